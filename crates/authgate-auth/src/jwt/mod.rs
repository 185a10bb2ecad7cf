//! Access token signing and verification, and refresh token generation.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod refresh;

pub use claims::{AUDIENCE, Claims, ISSUER};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use refresh::{REFRESH_TOKEN_BYTES, RefreshToken, RefreshTokenGenerator};
