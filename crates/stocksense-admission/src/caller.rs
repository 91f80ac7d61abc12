//! Caller key derivation from reverse-proxy headers.

/// Sentinel key used when no caller address can be derived. All anonymous
/// traffic shares one window under it.
pub const UNKNOWN_CALLER: &str = "unknown";

/// Derive a caller key from proxy headers: the first entry of
/// `X-Forwarded-For` if present and non-empty, else `X-Real-IP`, else
/// [`UNKNOWN_CALLER`]. The key is opaque; nothing downstream parses it as an
/// address.
pub fn caller_key(forwarded_for: Option<&str>, real_ip: Option<&str>) -> String {
    if let Some(chain) = forwarded_for {
        if let Some(first) = chain.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(ip) = real_ip {
        let ip = ip.trim();
        if !ip.is_empty() {
            return ip.to_string();
        }
    }
    UNKNOWN_CALLER.to_string()
}
