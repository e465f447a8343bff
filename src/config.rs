use egui::Vec2;

/// egui lays out in points; a point is 1/72 inch at the figure's DPI.
pub const POINTS_PER_INCH: f32 = 72.0;
pub const FIGURE_DPI: f32 = 144.0;

/// Fixed geometry of the rendered figure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureConfig {
    pub size_inches: Vec2,
    pub dpi: f32,
    /// Height in points kept free under the panel grid for the shared
    /// x-axis caption.
    pub caption_reserve: f32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            size_inches: egui::vec2(12.8, 9.6),
            dpi: FIGURE_DPI,
            caption_reserve: 28.0,
        }
    }
}

impl FigureConfig {
    pub fn pixels_per_point(&self) -> f32 {
        self.dpi / POINTS_PER_INCH
    }

    pub fn size_points(&self) -> Vec2 {
        self.size_inches * POINTS_PER_INCH
    }

    pub fn size_pixels(&self) -> [u32; 2] {
        let pixels = self.size_inches * self.dpi;
        [
            pixels.x.round().max(1.0) as u32,
            pixels.y.round().max(1.0) as u32,
        ]
    }

    /// PNG `pHYs` density for the configured DPI.
    pub fn pixels_per_meter(&self) -> u32 {
        (self.dpi / 0.0254).round().max(1.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry() {
        let config = FigureConfig::default();
        assert_eq!(config.dpi, 144.0);
        assert_eq!(config.pixels_per_point(), 2.0);
        assert_eq!(config.size_pixels(), [1843, 1382]);
    }

    #[test]
    fn points_times_scale_is_pixels() {
        let config = FigureConfig::default();
        let points = config.size_points();
        let [w, h] = config.size_pixels();
        assert!((points.x * config.pixels_per_point() - w as f32).abs() <= 0.5);
        assert!((points.y * config.pixels_per_point() - h as f32).abs() <= 0.5);
    }

    #[test]
    fn png_density_is_144_dpi() {
        assert_eq!(FigureConfig::default().pixels_per_meter(), 5669);
    }
}
