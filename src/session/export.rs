//! Blocking decode and encode steps run off the async executor.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;

use super::events::{ExportResult, ImageSource};
use crate::draw::encode_png;
use crate::error::EditorError;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Extracts the payload of a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, EditorError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| EditorError::Decode("not a data URI".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| EditorError::Decode("data URI has no payload".to_string()))?;
    if !meta.ends_with(";base64") {
        return Err(EditorError::Decode(
            "only base64 data URIs are supported".to_string(),
        ));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| EditorError::Decode(format!("invalid base64 payload: {e}")))
}

pub(crate) fn decode_source(source: ImageSource) -> Result<RgbaImage, EditorError> {
    let pixels = match source {
        ImageSource::Raster(pixels) => pixels,
        ImageSource::Encoded(bytes) => decode_bytes(&bytes)?,
        ImageSource::DataUri(uri) => decode_bytes(&decode_data_uri(&uri)?)?,
    };
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(EditorError::Decode("image has no pixels".to_string()));
    }
    Ok(pixels)
}

fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage, EditorError> {
    image::load_from_memory(bytes)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|e| EditorError::Decode(e.to_string()))
}

pub(crate) fn encode_export(pixels: &RgbaImage) -> Result<ExportResult, EditorError> {
    let blob = encode_png(pixels).map_err(|e| EditorError::Encode(e.to_string()))?;
    let encoded_text = format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(&blob));
    Ok(ExportResult { blob, encoded_text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn data_uri_payload_round_trips_through_export() {
        let pixels = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let exported = encode_export(&pixels).unwrap();

        assert!(exported.encoded_text.starts_with(PNG_DATA_URI_PREFIX));
        assert_eq!(decode_data_uri(&exported.encoded_text).unwrap(), exported.blob);

        let decoded = decode_source(ImageSource::DataUri(exported.encoded_text)).unwrap();
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn jpeg_sources_decode_to_rgba() {
        let photo = image::RgbImage::from_pixel(8, 6, image::Rgb([200, 40, 40]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(photo)
            .write_to(&mut bytes, image::ImageFormat::Jpeg)
            .unwrap();

        let decoded = decode_source(ImageSource::Encoded(bytes.into_inner())).unwrap();
        assert_eq!(decoded.dimensions(), (8, 6));
        let px = decoded.get_pixel(3, 3).0;
        assert_eq!(px[3], 255);
        assert!(px[0].abs_diff(200) < 8 && px[1].abs_diff(40) < 8);
    }

    #[test]
    fn malformed_inputs_are_decode_errors() {
        for source in [
            ImageSource::Encoded(b"not an image".to_vec()),
            ImageSource::DataUri("data:image/png,plain".to_string()),
            ImageSource::DataUri("image/png;base64,AAAA".to_string()),
            ImageSource::DataUri("data:image/png;base64,@@@".to_string()),
            ImageSource::Raster(RgbaImage::new(0, 4)),
        ] {
            assert!(matches!(
                decode_source(source),
                Err(EditorError::Decode(_))
            ));
        }
    }
}
