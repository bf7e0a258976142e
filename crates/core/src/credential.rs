//! Check-in credential issuance and verification.
//!
//! A credential is the plain string `"{shop}-{seat}-{slot}-{date}-{customer}"`
//! minted once at creation time and stored on the reservation. Verification
//! is pure equality against the stored value; no decoding happens at the
//! door. The QR image is a rendering of that string, never the source of
//! truth.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use qrcode::QrCode;
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::types::DbId;

/// Pixels per QR module in the rendered PNG.
const QR_SCALE: u32 = 8;

/// Quiet-zone border around the rendered code, in modules.
const QR_BORDER: u32 = 4;

/// Mint the credential string for a reservation identity.
///
/// The same identity always yields the same credential. Creation rejects a
/// second live reservation for the same identity, and the scan lookup skips
/// terminal rows, so a presented credential resolves to at most one live
/// reservation even after a cancel-and-rebook cycle.
pub fn issue(
    shop_id: DbId,
    seat_id: DbId,
    slot_id: DbId,
    date: chrono::NaiveDate,
    customer_id: DbId,
) -> String {
    format!("{shop_id}-{seat_id}-{slot_id}-{date}-{customer_id}")
}

/// Compare a presented credential against the stored one.
///
/// Both sides are hashed before comparison so the equality check does not
/// short-circuit on the first differing byte.
pub fn verify(stored: &str, presented: &str) -> bool {
    let a = Sha256::digest(stored.as_bytes());
    let b = Sha256::digest(presented.as_bytes());
    a == b
}

/// Render the credential as a PNG QR code wrapped in a
/// `data:image/png;base64,...` URL suitable for direct embedding.
pub fn qr_png_data_url(credential: &str) -> Result<String, CoreError> {
    let code = QrCode::new(credential.as_bytes())
        .map_err(|e| CoreError::Internal(format!("QR encoding failed: {e}")))?;

    let modules = code.width() as u32;
    let colors = code.to_colors();
    let size = (modules + 2 * QR_BORDER) * QR_SCALE;

    // Dark module = black, everything else (including the border) = white.
    let mut pixels = vec![0xFFu8; (size * size) as usize];
    for (idx, color) in colors.iter().enumerate() {
        if *color == qrcode::Color::Dark {
            let mx = (idx as u32 % modules + QR_BORDER) * QR_SCALE;
            let my = (idx as u32 / modules + QR_BORDER) * QR_SCALE;
            for dy in 0..QR_SCALE {
                let row = (my + dy) * size;
                for dx in 0..QR_SCALE {
                    pixels[(row + mx + dx) as usize] = 0x00;
                }
            }
        }
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, size, size, ExtendedColorType::L8)
        .map_err(|e| CoreError::Internal(format!("PNG encoding failed: {e}")))?;

    Ok(format!("data:image/png;base64,{}", BASE64.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 7).unwrap()
    }

    #[test]
    fn issue_concatenates_identity_fields() {
        assert_eq!(issue(3, 14, 15, date(), 92), "3-14-15-2026-09-07-92");
    }

    #[test]
    fn issue_is_deterministic() {
        assert_eq!(issue(1, 2, 3, date(), 4), issue(1, 2, 3, date(), 4));
    }

    #[test]
    fn changing_customer_changes_credential() {
        assert_ne!(issue(1, 2, 3, date(), 4), issue(1, 2, 3, date(), 5));
    }

    #[test]
    fn changing_date_changes_credential() {
        let other = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        assert_ne!(issue(1, 2, 3, date(), 4), issue(1, 2, 3, other, 4));
    }

    #[test]
    fn verify_accepts_exact_match() {
        let c = issue(1, 2, 3, date(), 4);
        assert!(verify(&c, &c.clone()));
    }

    #[test]
    fn verify_rejects_mismatch() {
        let c = issue(1, 2, 3, date(), 4);
        assert!(!verify(&c, "1-2-3-2026-09-07-5"));
        assert!(!verify(&c, ""));
    }

    #[test]
    fn qr_data_url_has_png_header() {
        let url = qr_png_data_url("1-2-3-2026-09-07-4").unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        // The payload must decode back to a PNG (magic bytes).
        let b64 = url.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = BASE64.decode(b64).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
