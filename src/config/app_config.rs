/// Application configuration containing all hardcoded values
///
/// This struct centralizes configuration values to make them easier to manage
/// and provides a foundation for future configuration file support.
#[derive(Clone)]
pub struct AppConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Upper bound on the designer count enforced by the UI; the engine
    /// itself accepts any positive value.
    pub max_designers: usize,
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub version: &'static str,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 900.0,
            max_designers: 60,
            app_title: "SplitImg Pro",
            app_subtitle: "Grouped image distribution for design teams",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
