use super::*;

/// Tracks where a node set is centered and how large it is, and moves or
/// scales every position in it uniformly.
///
/// Positions must only be changed through this type (or an engine owning
/// one); otherwise `center_point` and `current_size` go stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transform {
    center_point: Point,
    current_size: Size,
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center_point(&self) -> Point {
        self.center_point
    }

    pub fn model_geometric_size(&self) -> Size {
        self.current_size
    }

    pub(super) fn set_center_point(&mut self, center: Point) {
        self.center_point = center;
    }

    pub(super) fn set_current_size(&mut self, size: Size) {
        self.current_size = size;
    }

    /// Translates every position so the set ends up centered on `new_center`.
    pub fn move_into<T: Positioned>(&mut self, nodes: &mut [T], new_center: Point) {
        if self.center_point == new_center {
            return;
        }
        let delta = new_center - self.center_point;
        for node in nodes.iter_mut() {
            node.set_position(node.position() + delta);
        }
        self.center_point = new_center;
    }

    /// Stretches positions around the current center so the set spans `target`.
    pub fn scale_to<T: Positioned>(
        &mut self,
        nodes: &mut [T],
        target: Size,
    ) -> Result<(), LayoutError> {
        if self.current_size == target {
            return Ok(());
        }
        if self.current_size.is_degenerate() {
            return Err(LayoutError::InvalidLayoutState(format!(
                "cannot scale from a {}x{} layout",
                self.current_size.width, self.current_size.height
            )));
        }

        let original_center = self.center_point;
        self.move_into(nodes, Point::ORIGIN);

        let x_ratio = target.width as f64 / self.current_size.width as f64;
        let y_ratio = target.height as f64 / self.current_size.height as f64;
        for node in nodes.iter_mut() {
            let p = node.position();
            node.set_position(Point::new(
                (p.x as f64 * x_ratio).round() as i32,
                (p.y as f64 * y_ratio).round() as i32,
            ));
        }

        self.move_into(nodes, original_center);
        self.current_size = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Dot(Point);

    impl Positioned for Dot {
        fn position(&self) -> Point {
            self.0
        }

        fn set_position(&mut self, position: Point) {
            self.0 = position;
        }
    }

    fn dots() -> Vec<Dot> {
        vec![
            Dot(Point::new(-50, 0)),
            Dot(Point::new(50, 0)),
            Dot(Point::new(13, -37)),
            Dot(Point::new(-21, 44)),
        ]
    }

    fn sized(size: Size) -> Transform {
        let mut transform = Transform::new();
        transform.set_current_size(size);
        transform
    }

    #[test]
    fn move_into_same_point_is_a_no_op() {
        let mut nodes = dots();
        let mut transform = Transform::new();
        transform.move_into(&mut nodes, Point::new(10, 20));
        let once = nodes.clone();
        transform.move_into(&mut nodes, Point::new(10, 20));
        assert_eq!(nodes, once);
        assert_eq!(nodes[0].0, Point::new(-40, 20));
    }

    #[test]
    fn moves_compose() {
        let mut stepped = dots();
        let mut direct = dots();
        let mut a = Transform::new();
        a.move_into(&mut stepped, Point::new(100, -5));
        a.move_into(&mut stepped, Point::new(-7, 33));
        let mut b = Transform::new();
        b.move_into(&mut direct, Point::new(-7, 33));
        assert_eq!(stepped, direct);
        assert_eq!(a.center_point(), b.center_point());
    }

    #[test]
    fn scale_round_trip_stays_within_a_unit() {
        let original = dots();
        let mut nodes = original.clone();
        let mut transform = sized(Size::new(100, 100));
        transform.move_into(&mut nodes, Point::new(300, 200));
        transform.scale_to(&mut nodes, Size::new(250, 70)).unwrap();
        assert_eq!(transform.model_geometric_size(), Size::new(250, 70));
        assert_eq!(transform.center_point(), Point::new(300, 200));
        transform.scale_to(&mut nodes, Size::new(100, 100)).unwrap();
        transform.move_into(&mut nodes, Point::ORIGIN);
        for (after, before) in nodes.iter().zip(&original) {
            assert!((after.0.x - before.0.x).abs() <= 1, "{after:?} vs {before:?}");
            assert!((after.0.y - before.0.y).abs() <= 1, "{after:?} vs {before:?}");
        }
    }

    #[test]
    fn scale_doubles_around_center() {
        let mut nodes = vec![Dot(Point::new(110, 100)), Dot(Point::new(100, 90))];
        let mut transform = sized(Size::new(50, 50));
        transform.set_center_point(Point::new(100, 100));
        transform.scale_to(&mut nodes, Size::new(100, 150)).unwrap();
        assert_eq!(nodes[0].0, Point::new(120, 100));
        assert_eq!(nodes[1].0, Point::new(100, 70));
    }

    #[test]
    fn scale_to_current_size_is_a_no_op() {
        let mut nodes = dots();
        let mut transform = sized(Size::new(80, 80));
        transform.scale_to(&mut nodes, Size::new(80, 80)).unwrap();
        assert_eq!(nodes, dots());
    }

    #[test]
    fn scale_from_zero_size_fails() {
        let mut nodes = dots();
        let mut transform = Transform::new();
        let err = transform.scale_to(&mut nodes, Size::new(10, 10)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidLayoutState(_)));
        assert_eq!(nodes, dots());
    }
}
