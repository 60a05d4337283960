use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{self, BoxFuture, FutureExt, Shared};
use image::{ImageError, ImageFormat};

/// A downloaded image that decoded successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl AvatarImage {
    /// Validate raw bytes as an image and record its format and size.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, ImageError> {
        let format = image::guess_format(&bytes)?;
        let decoded = image::load_from_memory_with_format(&bytes, format)?;
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            format,
            bytes,
        })
    }

    /// The bytes exactly as they came off the wire
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Preferred file extension for the image format, e.g. "png"
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }
}

/// A download that several callers may be awaiting at once.
pub(crate) type PendingImage = Shared<BoxFuture<'static, Option<Arc<AvatarImage>>>>;

/// In-memory avatar cache keyed by the exact source URL string.
///
/// The cache is unbounded and never evicts: an entry lives until `clear`
/// is called or the cache is dropped. URLs are not normalized, so
/// `https://a/x.png` and `https://a/x.png?` are different keys.
///
/// Downloads in progress are tracked alongside the entries so that
/// concurrent requests for the same URL share a single network call.
#[derive(Default)]
pub struct ImageCache {
    entries: Mutex<HashMap<String, Arc<AvatarImage>>>,
    in_flight: Mutex<HashMap<String, PendingImage>>,
}

// Every operation is a single map call, so a poisoned map is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Arc<AvatarImage>> {
        lock(&self.entries).get(url).cloned()
    }

    pub fn insert(&self, url: impl Into<String>, image: Arc<AvatarImage>) {
        lock(&self.entries).insert(url.into(), image);
    }

    pub fn contains(&self, url: &str) -> bool {
        lock(&self.entries).contains_key(url)
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }

    /// Drop every cached image. Downloads already running are unaffected.
    pub fn clear(&self) {
        lock(&self.entries).clear();
    }

    /// Number of downloads currently being awaited
    pub fn pending(&self) -> usize {
        lock(&self.in_flight).len()
    }

    /// Join the running download for `url`, or register the one built by
    /// `start`. An entry that landed in the cache since the caller's last
    /// lookup is returned as an already-completed download.
    pub(crate) fn join_or_start<F>(&self, url: &str, start: F) -> PendingImage
    where
        F: FnOnce() -> BoxFuture<'static, Option<Arc<AvatarImage>>>,
    {
        let mut in_flight = lock(&self.in_flight);
        if let Some(pending) = in_flight.get(url) {
            return pending.clone();
        }
        if let Some(image) = self.get(url) {
            return future::ready(Some(image)).boxed().shared();
        }
        let pending = start().shared();
        in_flight.insert(url.to_string(), pending.clone());
        pending
    }

    /// Record the outcome of `pending`. Successful results are cached; the
    /// in-flight slot is released only if it still belongs to `pending`.
    pub(crate) fn finish(
        &self,
        url: &str,
        pending: &PendingImage,
        result: Option<&Arc<AvatarImage>>,
    ) {
        if let Some(image) = result {
            self.insert(url, Arc::clone(image));
        }
        let mut in_flight = lock(&self.in_flight);
        if in_flight.get(url).is_some_and(|current| current.ptr_eq(pending)) {
            in_flight.remove(url);
        }
    }
}

/// Encode a solid-colour PNG. Test-only.
#[cfg(test)]
pub(crate) fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut out, ImageFormat::Png)
        .expect("PNG encoding succeeds");
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avatar() -> Arc<AvatarImage> {
        Arc::new(AvatarImage::decode(png_fixture(4, 3)).unwrap())
    }

    #[test]
    fn test_decode_records_format_and_size() {
        let image = AvatarImage::decode(png_fixture(4, 3)).unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!((image.width(), image.height()), (4, 3));
        assert_eq!(image.extension(), "png");
        assert_eq!(image.bytes(), png_fixture(4, 3).as_slice());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(AvatarImage::decode(b"<html>not found</html>".to_vec()).is_err());
        assert!(AvatarImage::decode(Vec::new()).is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_png() {
        let mut bytes = png_fixture(8, 8);
        bytes.truncate(20);
        assert!(AvatarImage::decode(bytes).is_err());
    }

    #[test]
    fn test_get_returns_same_allocation() {
        let cache = ImageCache::new();
        let image = avatar();
        cache.insert("https://reqres.in/img/faces/2-image.jpg", Arc::clone(&image));

        let hit = cache.get("https://reqres.in/img/faces/2-image.jpg").unwrap();
        assert!(Arc::ptr_eq(&hit, &image));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_not_normalized() {
        let cache = ImageCache::new();
        cache.insert("https://reqres.in/img/2.jpg", avatar());
        assert!(!cache.contains("https://REQRES.in/img/2.jpg"));
        assert!(!cache.contains("https://reqres.in/img/2.jpg?"));
        assert!(!cache.contains("https://reqres.in/img/2.jpg/"));
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = ImageCache::new();
        cache.insert("a", avatar());
        cache.insert("b", avatar());
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_join_or_start_shares_running_download() {
        let cache = ImageCache::new();
        let first = cache.join_or_start("u", || future::pending().boxed());
        let second = cache.join_or_start("u", || panic!("second download started"));
        assert!(first.ptr_eq(&second));
        assert_eq!(cache.pending(), 1);
    }

    #[test]
    fn test_join_or_start_serves_cached_entry() {
        let cache = ImageCache::new();
        let image = avatar();
        cache.insert("u", Arc::clone(&image));
        let pending = cache.join_or_start("u", || panic!("download started for cached url"));
        let result = pending.now_or_never().flatten().unwrap();
        assert!(Arc::ptr_eq(&result, &image));
        assert_eq!(cache.pending(), 0);
    }

    #[test]
    fn test_finish_caches_success_and_releases_slot() {
        let cache = ImageCache::new();
        let image = avatar();
        let pending = cache.join_or_start("u", || future::pending().boxed());
        cache.finish("u", &pending, Some(&image));
        assert_eq!(cache.pending(), 0);
        assert!(Arc::ptr_eq(&cache.get("u").unwrap(), &image));
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cache = ImageCache::new();
        let pending = cache.join_or_start("u", || future::ready(None).boxed());
        cache.finish("u", &pending, None);
        assert!(!cache.contains("u"));
        assert_eq!(cache.pending(), 0);
    }

    #[test]
    fn test_stale_finish_keeps_newer_download() {
        let cache = ImageCache::new();
        let old = cache.join_or_start("u", || future::ready(None).boxed());
        cache.finish("u", &old, None);

        let newer = cache.join_or_start("u", || future::pending().boxed());
        // A late waiter on the old download must not release the new slot
        cache.finish("u", &old, None);
        assert_eq!(cache.pending(), 1);
        assert!(cache.join_or_start("u", || panic!("replaced")).ptr_eq(&newer));
    }
}
