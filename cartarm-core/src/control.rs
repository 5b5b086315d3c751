//! Parameter input.
//!
//! The panel owns the slider positions. Every change re-evaluates the
//! cart once and pushes the fresh result to all observers.

use crate::kinematic::{Cart, WorldPoints};
use crate::parameter::{ParameterId, Parameters, RawParameters};

/// Consumer of evaluation results, such as a renderer or label view.
pub trait Observer {
    fn update(&mut self, params: &Parameters, raw: &RawParameters, points: &WorldPoints);
}

pub struct Panel {
    cart: Cart,
    raw: RawParameters,
    points: WorldPoints,
    observers: Vec<Box<dyn Observer>>,
}

impl Panel {
    /// Construct a new panel and evaluate the initial positions.
    pub fn new(cart: Cart, raw: RawParameters) -> Self {
        let raw = raw.clamped();
        let points = cart.evaluate(&raw.normalize());

        Self {
            cart,
            raw,
            points,
            observers: Vec::new(),
        }
    }

    pub fn attach(&mut self, observer: Box<dyn Observer>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    #[inline]
    pub fn raw(&self) -> &RawParameters {
        &self.raw
    }

    #[inline]
    pub fn params(&self) -> Parameters {
        self.raw.normalize()
    }

    #[inline]
    pub fn points(&self) -> &WorldPoints {
        &self.points
    }

    /// Move a slider.
    ///
    /// The value is clamped into the slider range. Returns the value the
    /// slider settled on.
    pub fn set(&mut self, id: ParameterId, value: i32) -> i32 {
        let clamped = id.clamp(value);
        if clamped != value {
            log::debug!("Parameter {} clamped from {} to {}", id, value, clamped);
        }

        self.raw.set(id, clamped);
        self.refresh();

        clamped
    }

    /// Replace all slider positions at once.
    pub fn set_all(&mut self, raw: RawParameters) {
        self.raw = raw.clamped();
        self.refresh();
    }

    /// Evaluate and notify all observers.
    pub fn refresh(&mut self) {
        let params = self.raw.normalize();
        self.points = self.cart.evaluate(&params);

        log::debug!("Parameters changed: {}", params);

        for observer in self.observers.iter_mut() {
            observer.update(&params, &self.raw, &self.points);
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new(Cart::default(), RawParameters::default())
    }
}
