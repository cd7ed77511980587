//! Errors that may occur during encryption, decryption, and table
//! persistence.

/// Errors produced by the encryption scheme.
#[derive(Debug)]
pub enum ElGamalError {
    /// A plaintext integer fell outside `[-2^39, 2^39 - 1]`.
    OutOfRange,

    /// An operation that requires the secret key was attempted on a
    /// [`Scheme`](super::scheme::Scheme) constructed without one.
    MissingSecretKey,

    /// Decryption was attempted before a baby-step/giant-step table was
    /// built or loaded.
    TableNotLoaded,

    /// The baby-step/giant-step search exhausted all baby steps without
    /// finding a matching table entry.
    UndecryptableCiphertext,

    /// A persisted table could not be parsed.
    MalformedPersistence,
}
