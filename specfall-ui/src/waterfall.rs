use eframe::egui::{ColorImage, Image, Response, TextureHandle, TextureOptions, Ui, Widget};
use specfall_messages::WaterfallImage;

/// Waterfall display widget that renders the latest flushed image.
///
/// This widget implements the egui `Widget` trait for `&mut Waterfall`, allowing it
/// to be used with `ui.add(&mut waterfall)`. Pixels are computed in `set_image()`
/// when a new image arrives; the texture is only re-uploaded when
/// `needs_gpu_upload` is set.
pub struct Waterfall {
    image: ColorImage,
    needs_gpu_upload: bool,
    /// Cached texture handle to avoid re-uploading on every frame
    waterfall_texture_handle: Option<TextureHandle>,
}

impl Waterfall {
    pub fn new() -> Self {
        Self {
            image: ColorImage::default(),
            needs_gpu_upload: false,
            waterfall_texture_handle: None,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.image.pixels.is_empty()
    }

    /// Replace the displayed waterfall with `image`.
    pub fn set_image(&mut self, image: &WaterfallImage) {
        if image.samples.is_empty() {
            return;
        }
        let gray = grayscale(image);
        self.image = ColorImage::from_gray([image.width(), image.rows], &gray);
        self.needs_gpu_upload = true;
    }
}

/// Scale samples linearly from the image's own minimum to its maximum.
fn grayscale(image: &WaterfallImage) -> Vec<u8> {
    let (min_val, max_val) = image.value_range().unwrap_or((0.0, 0.0));
    let range_len = (max_val - min_val).max(f32::EPSILON); // avoid div by 0
    image
        .samples
        .iter()
        .map(|&v| {
            if v.is_finite() {
                (((v - min_val) / range_len) * 255.0).round() as u8
            } else {
                0
            }
        })
        .collect()
}

impl Widget for &mut Waterfall {
    /// Renders the waterfall display, stretched over the available space.
    fn ui(self, ui: &mut Ui) -> Response {
        if !self.has_data() {
            ui.label("Waiting for spectrum data...");
            return ui.response();
        }

        if self.needs_gpu_upload {
            // Nearest sampling keeps individual channels and integrations sharp
            let texture =
                ui.ctx()
                    .load_texture("waterfall", self.image.clone(), TextureOptions::NEAREST);
            self.waterfall_texture_handle = Some(texture);
            self.needs_gpu_upload = false;
        }

        if let Some(texture_handle) = &self.waterfall_texture_handle {
            let available_size = ui.available_size();
            ui.add(Image::new(texture_handle).fit_to_exact_size(available_size));
        }

        ui.response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specfall_messages::Orientation;

    fn image(samples: Vec<f32>) -> WaterfallImage {
        WaterfallImage {
            channels: 0..2,
            rows: samples.len() / 2,
            orientation: Orientation::NewestFirst,
            samples,
        }
    }

    #[test]
    fn test_grayscale_spans_min_to_max() {
        let gray = grayscale(&image(vec![-1.0, 0.0, 1.0, f32::NAN]));
        assert_eq!(gray, vec![0, 128, 255, 0]);
    }

    #[test]
    fn test_flat_image_is_black() {
        assert_eq!(grayscale(&image(vec![3.0; 4])), vec![0; 4]);
    }

    #[test]
    fn test_new_image_needs_upload() {
        let mut waterfall = Waterfall::new();
        assert!(!waterfall.has_data());

        waterfall.set_image(&image(vec![0.0, 1.0, 2.0, 3.0]));
        assert!(waterfall.has_data());
        assert!(waterfall.needs_gpu_upload);
        assert_eq!(waterfall.image.size, [2, 2]);
    }
}
