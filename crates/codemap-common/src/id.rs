/// A stable, opaque node identifier: lower-hex BLAKE3 of `(path, name)`,
/// truncated to the first 128 bits (32 hex characters).
///
/// Deterministic across processes and operating systems — unlike
/// `DefaultHasher`, BLAKE3's output does not depend on process-local
/// randomization.
///
/// # Examples
/// ```
/// use codemap_common::id::node_id;
/// let a = node_id("src/main.rs", "main");
/// let b = node_id("src/main.rs", "main");
/// assert_eq!(a, b);
/// assert_ne!(a, node_id("src/main.rs", "other"));
/// ```
pub fn node_id(path: &str, name: &str) -> String {
    let mut buf = String::with_capacity(path.len() + 1 + name.len());
    buf.push_str(path);
    buf.push('\0');
    buf.push_str(name);
    let digest = blake3::hash(buf.as_bytes());
    let bytes = &digest.as_bytes()[..16];
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_pure_and_deterministic() {
        assert_eq!(node_id("a/b.rs", "foo"), node_id("a/b.rs", "foo"));
    }

    #[test]
    fn distinguishes_name_and_path() {
        assert_ne!(node_id("a/b.rs", "foo"), node_id("a/b.rs", "bar"));
        assert_ne!(node_id("a/b.rs", "foo"), node_id("a/c.rs", "foo"));
    }

    #[test]
    fn is_32_hex_chars() {
        let id = node_id("x", "y");
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
