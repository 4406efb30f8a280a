//! Deterministic placeholder engagement metrics.
//!
//! When no upstream can report real like/comment counts, the numbers shown
//! on the site are derived from the post identifier so that the same post
//! always renders the same figures. Records built this way carry
//! `simulated: true`.

/// 32-bit polynomial rolling hash over the identifier characters.
fn hash_id(id: &str) -> i32 {
    let mut hash: i32 = 0;
    for c in id.chars() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(c as i32);
    }
    hash
}

/// Like count in `[50, 499]`, stable for a given identifier.
pub fn simulated_like_count(id: &str) -> u64 {
    let hash = hash_id(id);
    ((hash % 450).unsigned_abs() + 50) as u64
}

/// Comment count in `[5, 49]`, stable for a given identifier.
pub fn simulated_comment_count(id: &str) -> u64 {
    let hash = hash_id(id) as i64;
    ((hash * 7) % 45).unsigned_abs() + 5
}

/// Placeholder image URL for posts whose media could not be resolved.
pub fn placeholder_image_url(id: &str) -> String {
    let hash = hash_id(id);
    format!(
        "https://picsum.photos/400/400?random={}",
        (hash % 1000).unsigned_abs()
    )
}
