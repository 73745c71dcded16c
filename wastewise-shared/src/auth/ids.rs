/// Entity id generation
///
/// New records get a resource prefix followed by a short random suffix,
/// e.g. `usr-k3j9x0a` or `inv-0pz81qe`.
///
/// Ids are not checked for uniqueness. With 36^7 (~7.8e10) possible suffixes
/// a collision within one in-memory dataset is not a practical concern.
///
/// # Example
///
/// ```
/// use wastewise_shared::auth::ids::{generate_id, USER_PREFIX};
///
/// let id = generate_id(USER_PREFIX);
/// assert!(id.starts_with("usr-"));
/// assert_eq!(id.len(), 11);
/// ```

use rand::Rng;

/// Length of the random suffix
pub const SUFFIX_LENGTH: usize = 7;

/// Prefix for user ids
pub const USER_PREFIX: &str = "usr-";

/// Prefix for invoice ids
pub const INVOICE_PREFIX: &str = "inv-";

/// Generates `prefix` + 7 random base36 characters (`[0-9a-z]`)
pub fn generate_id(prefix: &str) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();

    let suffix: String = (0..SUFFIX_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    format!("{}{}", prefix, suffix)
}
