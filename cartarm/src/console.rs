use cartarm_core::control::Observer;
use cartarm_core::label::Labels;
use cartarm_core::nalgebra::Point2;
use cartarm_core::scene::{Canvas, Circle, Scene};
use cartarm_core::{CartGeometry, Parameters, RawParameters, WorldPoints};

/// Prints the label panel on every update.
pub struct LabelPrinter;

impl Observer for LabelPrinter {
    fn update(&mut self, _params: &Parameters, raw: &RawParameters, points: &WorldPoints) {
        println!("{}", Labels::from_state(raw, points));
        println!();
    }
}

/// Prints the scene primitives on every update.
pub struct ScenePrinter {
    geometry: CartGeometry,
}

impl ScenePrinter {
    pub fn new(geometry: CartGeometry) -> Self {
        Self { geometry }
    }
}

impl Observer for ScenePrinter {
    fn update(&mut self, _params: &Parameters, _raw: &RawParameters, points: &WorldPoints) {
        Scene::compose(points, &self.geometry).draw(&mut TextCanvas);
        println!();
    }
}

/// Canvas writing one line per primitive to stdout.
struct TextCanvas;

impl Canvas for TextCanvas {
    fn line(&mut self, from: Point2<f64>, to: Point2<f64>) {
        println!(
            "line   ({:>+6.3}, {:>+6.3}) -> ({:>+6.3}, {:>+6.3})",
            from.x, from.y, to.x, to.y
        );
    }

    fn circle(&mut self, circle: &Circle) {
        println!(
            "circle ({:>+6.3}, {:>+6.3}) r={:.3}",
            circle.center.x, circle.center.y, circle.radius
        );
    }

    fn dot(&mut self, circle: &Circle) {
        println!(
            "dot    ({:>+6.3}, {:>+6.3}) r={:.3}",
            circle.center.x, circle.center.y, circle.radius
        );
    }
}
