use crate::Result;
use http::request::Parts;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

/// SigningCredential is the trait used by signer as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential carries everything required to sign.
    fn is_valid(&self) -> bool;
}

/// SignRequest is the capability a client uses to sign its requests.
///
/// Implementations compute the signature over the request parts and body,
/// then write the resulting headers into `req`. On error `req` must be left
/// untouched.
///
/// Signing is synchronous and performs no I/O.
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: SigningCredential;

    /// Sign the request in place.
    ///
    /// ## Body
    ///
    /// The `body` is only read to compute the payload hash, it is never
    /// modified.
    fn sign_request(
        &self,
        req: &mut Parts,
        body: &[u8],
        credential: &Self::Credential,
    ) -> Result<()>;
}

/// SignFn adapts a plain function or closure into a [`SignRequest`].
///
/// ```
/// use kinesign_core::{Error, SignFn, SigningCredential};
///
/// #[derive(Clone, Debug)]
/// struct Token(String);
///
/// impl SigningCredential for Token {
///     fn is_valid(&self) -> bool {
///         !self.0.is_empty()
///     }
/// }
///
/// let signer = SignFn::new(|req: &mut http::request::Parts, _: &[u8], token: &Token| {
///     if !token.is_valid() {
///         return Err(Error::credential_invalid("token is empty"));
///     }
///     req.headers.insert("x-token", token.0.parse()?);
///     Ok(())
/// });
/// ```
pub struct SignFn<K, F> {
    f: F,
    _credential: PhantomData<fn(&K)>,
}

impl<K, F> SignFn<K, F>
where
    K: SigningCredential,
    F: Fn(&mut Parts, &[u8], &K) -> Result<()> + Send + Sync + Unpin + 'static,
{
    /// Create a new signer from given function.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _credential: PhantomData,
        }
    }
}

impl<K, F> Debug for SignFn<K, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignFn").finish_non_exhaustive()
    }
}

impl<K, F> SignRequest for SignFn<K, F>
where
    K: SigningCredential,
    F: Fn(&mut Parts, &[u8], &K) -> Result<()> + Send + Sync + Unpin + 'static,
{
    type Credential = K;

    fn sign_request(&self, req: &mut Parts, body: &[u8], credential: &K) -> Result<()> {
        (self.f)(req, body, credential)
    }
}
