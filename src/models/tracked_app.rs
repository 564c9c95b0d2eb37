/// An application the usage report covers, keyed by its platform package id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedApp {
    pub identifier: &'static str,
    pub display_name: &'static str,
}

impl TrackedApp {
    pub const fn new(identifier: &'static str, display_name: &'static str) -> Self {
        Self {
            identifier,
            display_name,
        }
    }
}

/// Social media apps tracked by DeepTrack, in report order.
pub const SOCIAL_MEDIA_APPS: &[TrackedApp] = &[
    TrackedApp::new("com.instagram.android", "Instagram"),
    TrackedApp::new("com.zhiliaoapp.musically", "TikTok"),
    TrackedApp::new("com.twitter.android", "Twitter"),
    TrackedApp::new("com.google.android.youtube", "YouTube"),
];
