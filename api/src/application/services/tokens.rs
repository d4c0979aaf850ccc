use base64::Engine as _;
use rand::RngCore;

const REFRESH_TOKEN_BYTES: usize = 32;

/// URL-safe random token used as a session's refresh token.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
