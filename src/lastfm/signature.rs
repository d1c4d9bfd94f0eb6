use std::collections::BTreeMap;

/// Parameter controlling the response format; never part of the signed material.
pub const FORMAT_PARAM: &str = "format";

/// Computes the `api_sig` for a parameter set.
///
/// Keys are sorted by byte order, each `key` + `value` pair is concatenated
/// without separators, the shared secret is appended and the result is MD5
/// hashed. Returns the lowercase hex digest. The `format` parameter is dropped
/// before signing, so callers may pass the full request map.
pub fn sign<'a, I, K, V>(params: I, secret: &str) -> String
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: AsRef<str> + ?Sized + 'a,
    V: AsRef<str> + ?Sized + 'a,
{
    let sorted: BTreeMap<&str, &str> = params
        .into_iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .filter(|(k, _)| *k != FORMAT_PARAM)
        .collect();

    let mut material = String::new();
    for (key, value) in sorted {
        material.push_str(key);
        material.push_str(value);
    }
    material.push_str(secret);

    format!("{:x}", md5::compute(material.as_bytes()))
}
