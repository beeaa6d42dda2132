pub mod digest;
pub mod encoding;
pub mod error;

pub use digest::{md5, sha1};
pub use encoding::base64;
pub use error::{Base64Error, Sha1Error};
