//! Request bodies for the generation and editing endpoints.
//!
//! Every optional field is left out of the JSON when unset, so Prodia applies
//! its own default. The SD and SDXL endpoints share these types.

use base64::Engine;
use serde::Serialize;

/// An input image, either hosted or inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Publicly reachable URL.
    Url(String),
    /// Base64-encoded image bytes.
    Data(String),
}

impl ImageSource {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Encode raw image bytes (PNG, JPEG, ...) for upload.
    pub fn bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::Data(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    fn split(self) -> (Option<String>, Option<String>) {
        match self {
            Self::Url(url) => (Some(url), None),
            Self::Data(data) => (None, Some(data)),
        }
    }
}

/// Output framing preset for SD generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    Square,
    Portrait,
    Landscape,
}

/// Upscale factor for `/upscale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpscaleFactor {
    X2,
    X4,
}

impl Serialize for UpscaleFactor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Self::X2 => 2,
            Self::X4 => 4,
        })
    }
}

/// Sampling options shared by every diffusion endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SamplingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Ask the server to 2x upscale the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upscale: Option<bool>,
}

// Builder methods forwarding into the `sampling` field.
macro_rules! sampling_builders {
    ($ty:ty) => {
        impl $ty {
            /// Set the model checkpoint (see `models()` / `sdxl_models()`).
            pub fn model(mut self, model: impl Into<String>) -> Self {
                self.sampling.model = Some(model.into());
                self
            }

            /// Set the negative prompt.
            pub fn negative(mut self, prompt: impl Into<String>) -> Self {
                self.sampling.negative_prompt = Some(prompt.into());
                self
            }

            /// Set a style preset (e.g. "cinematic", "anime").
            pub fn style_preset(mut self, preset: impl Into<String>) -> Self {
                self.sampling.style_preset = Some(preset.into());
                self
            }

            /// Set the number of sampling steps.
            pub fn steps(mut self, steps: u32) -> Self {
                self.sampling.steps = Some(steps);
                self
            }

            /// Set the classifier-free guidance scale.
            pub fn cfg_scale(mut self, cfg: f64) -> Self {
                self.sampling.cfg_scale = Some(cfg);
                self
            }

            /// Set a specific seed. Unset means random.
            pub fn seed(mut self, seed: i64) -> Self {
                self.sampling.seed = Some(seed);
                self
            }

            /// Set the sampler (see `samplers()` / `sdxl_samplers()`).
            pub fn sampler(mut self, sampler: impl Into<String>) -> Self {
                self.sampling.sampler = Some(sampler.into());
                self
            }

            /// Set output dimensions.
            pub fn size(mut self, width: u32, height: u32) -> Self {
                self.sampling.width = Some(width);
                self.sampling.height = Some(height);
                self
            }

            /// Enable server-side 2x upscaling of the output.
            pub fn upscale(mut self, enabled: bool) -> Self {
                self.sampling.upscale = Some(enabled);
                self
            }
        }
    };
}

/// Parameters for `/sd/generate` and `/sdxl/generate`.
///
/// # Example
/// ```
/// use prodia_rs::GenerateParams;
///
/// let params = GenerateParams::new("a cat in space")
///     .model("sd_xl_base_1.0.safetensors [be9edd61]")
///     .negative("lowres, blurry")
///     .steps(25)
///     .cfg_scale(7.0);
///
/// let body = serde_json::to_value(&params).unwrap();
/// assert_eq!(body["prompt"], "a cat in space");
/// assert!(body.get("seed").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateParams {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(flatten)]
    pub sampling: SamplingOptions,
}

impl GenerateParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: None,
            sampling: SamplingOptions::default(),
        }
    }

    /// Pick a framing preset instead of explicit dimensions.
    ///
    /// SD only: `sdxl_generate` forwards it and Prodia answers 400.
    pub fn aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }
}

sampling_builders!(GenerateParams);

/// Parameters for image-to-image: `/sd/transform` and `/sdxl/transform`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformParams {
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "imageData", skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    pub prompt: String,
    /// How far the output may drift from the input image (0.0 - 1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denoising_strength: Option<f64>,
    #[serde(flatten)]
    pub sampling: SamplingOptions,
}

impl TransformParams {
    pub fn new(image: ImageSource, prompt: impl Into<String>) -> Self {
        let (image_url, image_data) = image.split();
        Self {
            image_url,
            image_data,
            prompt: prompt.into(),
            denoising_strength: None,
            sampling: SamplingOptions::default(),
        }
    }

    pub fn denoising_strength(mut self, strength: f64) -> Self {
        self.denoising_strength = Some(strength);
        self
    }
}

sampling_builders!(TransformParams);

/// What the masked area starts from before inpainting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InpaintFill {
    Fill,
    Original,
    LatentNoise,
    LatentNothing,
}

impl Serialize for InpaintFill {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Parameters for `/sd/inpaint` and `/sdxl/inpaint`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InpaintParams {
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "imageData", skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(rename = "maskUrl", skip_serializing_if = "Option::is_none")]
    pub mask_url: Option<String>,
    #[serde(rename = "maskData", skip_serializing_if = "Option::is_none")]
    pub mask_data: Option<String>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denoising_strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_blur: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inpainting_fill: Option<InpaintFill>,
    /// 0 paints inside the mask, 1 paints outside it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inpainting_mask_invert: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inpainting_full_res: Option<bool>,
    #[serde(flatten)]
    pub sampling: SamplingOptions,
}

impl InpaintParams {
    pub fn new(image: ImageSource, mask: ImageSource, prompt: impl Into<String>) -> Self {
        let (image_url, image_data) = image.split();
        let (mask_url, mask_data) = mask.split();
        Self {
            image_url,
            image_data,
            mask_url,
            mask_data,
            prompt: prompt.into(),
            denoising_strength: None,
            mask_blur: None,
            inpainting_fill: None,
            inpainting_mask_invert: None,
            inpainting_full_res: None,
            sampling: SamplingOptions::default(),
        }
    }

    pub fn denoising_strength(mut self, strength: f64) -> Self {
        self.denoising_strength = Some(strength);
        self
    }

    pub fn mask_blur(mut self, blur: u32) -> Self {
        self.mask_blur = Some(blur);
        self
    }

    pub fn fill(mut self, fill: InpaintFill) -> Self {
        self.inpainting_fill = Some(fill);
        self
    }

    /// Repaint everything outside the mask instead of inside it.
    pub fn invert_mask(mut self, invert: bool) -> Self {
        self.inpainting_mask_invert = Some(u8::from(invert));
        self
    }

    pub fn full_res(mut self, enabled: bool) -> Self {
        self.inpainting_full_res = Some(enabled);
        self
    }
}

sampling_builders!(InpaintParams);

/// Parameters for `/sd/controlnet`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlNetParams {
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "imageData", skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    pub controlnet_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controlnet_module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controlnet_mode: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_a: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_b: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_mode: Option<u8>,
    pub prompt: String,
    #[serde(flatten)]
    pub sampling: SamplingOptions,
}

impl ControlNetParams {
    pub fn new(
        image: ImageSource,
        controlnet_model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        let (image_url, image_data) = image.split();
        Self {
            image_url,
            image_data,
            controlnet_model: controlnet_model.into(),
            controlnet_module: None,
            controlnet_mode: None,
            threshold_a: None,
            threshold_b: None,
            resize_mode: None,
            prompt: prompt.into(),
            sampling: SamplingOptions::default(),
        }
    }

    /// Set the preprocessor (e.g. "canny", "depth", "none").
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.controlnet_module = Some(module.into());
        self
    }

    /// 0 balanced, 1 prompt-weighted, 2 control-weighted.
    pub fn mode(mut self, mode: u8) -> Self {
        self.controlnet_mode = Some(mode);
        self
    }

    /// Preprocessor thresholds (canny low/high, etc).
    pub fn thresholds(mut self, a: u32, b: u32) -> Self {
        self.threshold_a = Some(a);
        self.threshold_b = Some(b);
        self
    }

    pub fn resize_mode(mut self, mode: u8) -> Self {
        self.resize_mode = Some(mode);
        self
    }
}

sampling_builders!(ControlNetParams);

/// Parameters for `/upscale`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpscaleParams {
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "imageData", skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    pub resize: UpscaleFactor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl UpscaleParams {
    pub fn new(image: ImageSource, resize: UpscaleFactor) -> Self {
        let (image_url, image_data) = image.split();
        Self {
            image_url,
            image_data,
            resize,
            model: None,
        }
    }

    /// Set the upscaler model (e.g. "SwinIR_4x", "ESRGAN_4x").
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Parameters for `/faceswap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceSwapParams {
    /// Image providing the face.
    #[serde(rename = "sourceUrl")]
    pub source_url: String,
    /// Image receiving the face.
    #[serde(rename = "targetUrl")]
    pub target_url: String,
}

impl FaceSwapParams {
    pub fn new(source_url: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            target_url: target_url.into(),
        }
    }
}

/// Parameters for `/facerestore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceRestoreParams {
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "imageData", skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

impl FaceRestoreParams {
    pub fn new(image: ImageSource) -> Self {
        let (image_url, image_data) = image.split();
        Self {
            image_url,
            image_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_minimal() {
        let body = serde_json::to_value(GenerateParams::new("a fox")).unwrap();
        assert_eq!(body, json!({"prompt": "a fox"}));
    }

    #[test]
    fn test_generate_full() {
        let params = GenerateParams::new("a fox")
            .model("v1-5-pruned-emaonly.safetensors [d7049739]")
            .negative("blurry")
            .style_preset("anime")
            .steps(30)
            .cfg_scale(7.5)
            .seed(42)
            .sampler("DPM++ 2M Karras")
            .size(512, 768)
            .upscale(true)
            .aspect_ratio(AspectRatio::Portrait);
        let body = serde_json::to_value(&params).unwrap();

        assert_eq!(body["model"], "v1-5-pruned-emaonly.safetensors [d7049739]");
        assert_eq!(body["negative_prompt"], "blurry");
        assert_eq!(body["style_preset"], "anime");
        assert_eq!(body["steps"], 30);
        assert_eq!(body["cfg_scale"], 7.5);
        assert_eq!(body["seed"], 42);
        assert_eq!(body["sampler"], "DPM++ 2M Karras");
        assert_eq!(body["width"], 512);
        assert_eq!(body["height"], 768);
        assert_eq!(body["upscale"], true);
        assert_eq!(body["aspect_ratio"], "portrait");
    }

    #[test]
    fn test_image_source_bytes() {
        let source = ImageSource::bytes(b"hello");
        assert_eq!(source, ImageSource::Data("aGVsbG8=".to_string()));
    }

    #[test]
    fn test_transform_url_vs_data() {
        let body = serde_json::to_value(
            TransformParams::new(ImageSource::url("https://x/in.png"), "oil painting")
                .denoising_strength(0.6),
        )
        .unwrap();
        assert_eq!(body["imageUrl"], "https://x/in.png");
        assert!(body.get("imageData").is_none());
        assert_eq!(body["denoising_strength"], 0.6);

        let body =
            serde_json::to_value(TransformParams::new(ImageSource::bytes([1u8, 2, 3]), "x"))
                .unwrap();
        assert!(body.get("imageUrl").is_none());
        assert_eq!(body["imageData"], "AQID");
    }

    #[test]
    fn test_inpaint_fields() {
        let params = InpaintParams::new(
            ImageSource::url("https://x/in.png"),
            ImageSource::url("https://x/mask.png"),
            "a red door",
        )
        .mask_blur(4)
        .fill(InpaintFill::LatentNoise)
        .invert_mask(true)
        .full_res(false);
        let body = serde_json::to_value(&params).unwrap();

        assert_eq!(body["imageUrl"], "https://x/in.png");
        assert_eq!(body["maskUrl"], "https://x/mask.png");
        assert_eq!(body["mask_blur"], 4);
        assert_eq!(body["inpainting_fill"], 2);
        assert_eq!(body["inpainting_mask_invert"], 1);
        assert_eq!(body["inpainting_full_res"], false);
    }

    #[test]
    fn test_controlnet_fields() {
        let params = ControlNetParams::new(
            ImageSource::url("https://x/edges.png"),
            "control_v11p_sd15_canny [d14c016b]",
            "a castle",
        )
        .module("canny")
        .thresholds(100, 200)
        .steps(20);
        let body = serde_json::to_value(&params).unwrap();

        assert_eq!(body["controlnet_model"], "control_v11p_sd15_canny [d14c016b]");
        assert_eq!(body["controlnet_module"], "canny");
        assert_eq!(body["threshold_a"], 100);
        assert_eq!(body["threshold_b"], 200);
        assert_eq!(body["steps"], 20);
        assert!(body.get("controlnet_mode").is_none());
    }

    #[test]
    fn test_upscale_factor() {
        let body = serde_json::to_value(
            UpscaleParams::new(ImageSource::url("https://x/a.png"), UpscaleFactor::X4)
                .model("ESRGAN_4x"),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({"imageUrl": "https://x/a.png", "resize": 4, "model": "ESRGAN_4x"})
        );
    }

    #[test]
    fn test_face_params() {
        let body =
            serde_json::to_value(FaceSwapParams::new("https://x/src.png", "https://x/dst.png"))
                .unwrap();
        assert_eq!(
            body,
            json!({"sourceUrl": "https://x/src.png", "targetUrl": "https://x/dst.png"})
        );

        let body =
            serde_json::to_value(FaceRestoreParams::new(ImageSource::url("https://x/f.png")))
                .unwrap();
        assert_eq!(body, json!({"imageUrl": "https://x/f.png"}));
    }
}
