//! How an image is fitted into a destination rectangle

use serde::{Deserialize, Serialize};

use crate::foundation::math::Rect;

/// Scaling applied when an image's aspect differs from its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Stretch the image to cover the destination exactly
    #[default]
    StretchToFill,
    /// Fill the destination and crop whatever overflows
    ScaleAndCrop,
    /// Fit the whole image inside the destination, leaving bars
    ScaleToFit,
}

impl ScaleMode {
    /// Compute the screen rectangle and normalized source rectangle for a draw
    ///
    /// `image_aspect` is width / height of the image. Non-positive values, and
    /// destinations without area, fall back to stretching.
    pub fn calculate(self, position: Rect, image_aspect: f32) -> (Rect, Rect) {
        let full = Rect::unit();

        let Some(dest_aspect) = position.aspect() else {
            return (position, full);
        };
        if image_aspect <= 0.0 || !image_aspect.is_finite() || dest_aspect <= 0.0 {
            return (position, full);
        }

        match self {
            Self::StretchToFill => (position, full),
            Self::ScaleAndCrop => {
                if dest_aspect > image_aspect {
                    // Destination is wider: keep full width, crop top and bottom
                    let stretch = image_aspect / dest_aspect;
                    (position, Rect::new(0.0, (1.0 - stretch) * 0.5, 1.0, stretch))
                } else {
                    let stretch = dest_aspect / image_aspect;
                    (position, Rect::new(0.5 - stretch * 0.5, 0.0, stretch, 1.0))
                }
            }
            Self::ScaleToFit => {
                if dest_aspect > image_aspect {
                    // Destination is wider: pillarbox
                    let stretch = image_aspect / dest_aspect;
                    let screen = Rect::new(
                        position.x + position.width * (1.0 - stretch) * 0.5,
                        position.y,
                        position.width * stretch,
                        position.height,
                    );
                    (screen, full)
                } else {
                    let stretch = dest_aspect / image_aspect;
                    let screen = Rect::new(
                        position.x,
                        position.y + position.height * (1.0 - stretch) * 0.5,
                        position.width,
                        position.height * stretch,
                    );
                    (screen, full)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_rect_eq(actual: Rect, expected: Rect) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(actual.width, expected.width, epsilon = 1e-5);
        assert_relative_eq!(actual.height, expected.height, epsilon = 1e-5);
    }

    #[test]
    fn test_stretch_ignores_aspect() {
        let position = Rect::new(10.0, 10.0, 200.0, 100.0);
        let (screen, source) = ScaleMode::StretchToFill.calculate(position, 1.0);
        assert_eq!(screen, position);
        assert_eq!(source, Rect::unit());
    }

    #[test]
    fn test_fit_square_image_in_wide_rect() {
        let position = Rect::new(0.0, 0.0, 200.0, 100.0);
        let (screen, source) = ScaleMode::ScaleToFit.calculate(position, 1.0);
        assert_rect_eq(screen, Rect::new(50.0, 0.0, 100.0, 100.0));
        assert_eq!(source, Rect::unit());
    }

    #[test]
    fn test_fit_wide_image_in_square_rect() {
        let position = Rect::new(0.0, 0.0, 100.0, 100.0);
        let (screen, _) = ScaleMode::ScaleToFit.calculate(position, 2.0);
        assert_rect_eq(screen, Rect::new(0.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn test_crop_square_image_in_wide_rect() {
        let position = Rect::new(0.0, 0.0, 200.0, 100.0);
        let (screen, source) = ScaleMode::ScaleAndCrop.calculate(position, 1.0);
        assert_eq!(screen, position);
        assert_rect_eq(source, Rect::new(0.0, 0.25, 1.0, 0.5));
    }

    #[test]
    fn test_crop_wide_image_in_square_rect() {
        let position = Rect::new(0.0, 0.0, 100.0, 100.0);
        let (_, source) = ScaleMode::ScaleAndCrop.calculate(position, 4.0);
        assert_rect_eq(source, Rect::new(0.375, 0.0, 0.25, 1.0));
    }

    #[test]
    fn test_matching_aspect_is_identity() {
        let position = Rect::new(5.0, 5.0, 160.0, 100.0);
        for mode in [ScaleMode::StretchToFill, ScaleMode::ScaleAndCrop, ScaleMode::ScaleToFit] {
            let (screen, source) = mode.calculate(position, 1.6);
            assert_rect_eq(screen, position);
            assert_rect_eq(source, Rect::unit());
        }
    }

    #[test]
    fn test_degenerate_inputs_stretch() {
        let flat = Rect::new(0.0, 0.0, 100.0, 0.0);
        assert_eq!(ScaleMode::ScaleToFit.calculate(flat, 1.0), (flat, Rect::unit()));

        let position = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(ScaleMode::ScaleAndCrop.calculate(position, 0.0), (position, Rect::unit()));
        assert_eq!(ScaleMode::ScaleToFit.calculate(position, f32::NAN), (position, Rect::unit()));
    }
}
