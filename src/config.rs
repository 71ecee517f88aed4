use std::path::PathBuf;

/// Every fixed setting of a chart run, gathered in one place.
#[derive(Debug, Clone)]
pub struct Config {
    /// Population counts by age (rows) and year (columns).
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Ages whose share never exceeds this in any year are cut from the top.
    pub truncation_threshold: f64,
    /// Baseline of the first curve.
    pub start_offset: f64,
    /// Figure size in inches (width, height).
    pub figure_size: (f64, f64),
    pub dpi: u32,
    pub title: String,
    pub colorbar_label: String,
    /// Every n-th year gets a y-axis tick (the last year always does).
    pub tick_stride: usize,
    /// Preferred typeface; `font_fallback` is used when it cannot be loaded.
    pub font_family: String,
    pub font_fallback: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/Age_data_DK.csv"),
            output_path: PathBuf::from("frequency_trails_DK_age.png"),
            truncation_threshold: 1e-5,
            start_offset: 0.5,
            figure_size: (14.0, 10.0),
            dpi: 300,
            title: "Evolution of Denmark's age distribution over three decades".to_string(),
            colorbar_label: "Mean age of population (yrs)".to_string(),
            tick_stride: 5,
            font_family: "Tahoma".to_string(),
            font_fallback: "sans-serif".to_string(),
        }
    }
}

impl Config {
    /// Output image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        let dpi = self.dpi as f64;
        ((w * dpi).round() as u32, (h * dpi).round() as u32)
    }

    /// Scale a font size given in points to pixels at the configured dpi.
    pub fn font_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }
}
