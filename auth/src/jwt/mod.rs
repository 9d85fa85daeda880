pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::TOKEN_ISSUER;
pub use claims::TOKEN_LIFETIME_HOURS;
pub use codec::TokenCodec;
pub use errors::TokenError;
