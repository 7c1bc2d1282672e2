//! Typed findings and their human-readable rendering.

use serde::{Deserialize, Serialize};

/// Language used to render reason strings.
///
/// Russian is the default: it is the language the blocking message and
/// the "no indicators" sentinel were first written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    /// Parse a locale tag such as `ru`, `en-US` or `en_US.UTF-8`.
    ///
    /// Unrecognised tags fall back to the default.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Self::En,
            _ => Self::Ru,
        }
    }
}

/// A single triggered condition inside a signal group.
#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    UaKeyword { keyword: &'static str },
    UaX86OnMobile,
    PlatformDesktopOnAndroid { platform: String },
    PlatformX86OnAndroid { platform: String },
    PlatformMismatchOnIos { platform: String },
    ScreenResolution { width: u32, height: u32 },
    PixelRatioUnusual { ratio: f64 },
    PixelRatioOutOfRange { ratio: f64 },
    ScreenTooLarge { pixels: u64 },
    CpuCoresLow { cores: u32 },
    CpuCoresHigh { cores: u32 },
    MemoryUnusual { gib: f64 },
    MemoryExcessive { gib: f64 },
    TouchMissing,
    TouchPointsLow { points: u32 },
    TouchOnDesktop { points: u32 },
    GpuKeyword { keyword: &'static str },
    GpuSoftwareRenderer,
    GpuRendererMasked { renderer: String },
    /// Sentinel used when no condition triggered anywhere.
    NoIndicators,
}

impl Reason {
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::Ru => self.render_ru(),
            Locale::En => self.render_en(),
        }
    }

    fn render_ru(&self) -> String {
        match self {
            Self::UaKeyword { keyword } => {
                format!("Подозрительное ключевое слово в User-Agent: {keyword}")
            }
            Self::UaX86OnMobile => "Архитектура x86 в User-Agent мобильной ОС".to_string(),
            Self::PlatformDesktopOnAndroid { platform } => {
                format!("Десктопная платформа «{platform}» при Android User-Agent")
            }
            Self::PlatformX86OnAndroid { platform } => {
                format!("Платформа x86/x64 «{platform}» при Android User-Agent")
            }
            Self::PlatformMismatchOnIos { platform } => {
                format!("Платформа «{platform}» не соответствует iOS User-Agent")
            }
            Self::ScreenResolution { width, height } => {
                format!("Разрешение экрана {width}x{height} типично для эмулятора")
            }
            Self::PixelRatioUnusual { ratio } => {
                format!("Нестандартный devicePixelRatio: {ratio}")
            }
            Self::PixelRatioOutOfRange { ratio } => {
                format!("devicePixelRatio вне реалистичного диапазона: {ratio}")
            }
            Self::ScreenTooLarge { pixels } => {
                format!("Слишком большое разрешение для мобильного устройства: {pixels} пикселей")
            }
            Self::CpuCoresLow { cores } => {
                format!("Мало ядер процессора для мобильного устройства: {cores}")
            }
            Self::CpuCoresHigh { cores } => {
                format!("Слишком много ядер процессора для мобильного устройства: {cores}")
            }
            Self::MemoryUnusual { gib } => format!("Нестандартный объём памяти: {gib} ГБ"),
            Self::MemoryExcessive { gib } => format!("Слишком большой объём памяти: {gib} ГБ"),
            Self::TouchMissing => "Мобильный User-Agent без поддержки сенсорного ввода".to_string(),
            Self::TouchPointsLow { points } => {
                format!("Мало точек касания для мобильного устройства: {points}")
            }
            Self::TouchOnDesktop { points } => {
                format!("Сенсорный ввод при десктопном User-Agent: {points} точек касания")
            }
            Self::GpuKeyword { keyword } => format!("Признак виртуального GPU: {keyword}"),
            Self::GpuSoftwareRenderer => "Программный или обобщённый рендерер GPU".to_string(),
            Self::GpuRendererMasked { renderer } => {
                format!("Подозрительно короткое или скрытое имя GPU: «{renderer}»")
            }
            Self::NoIndicators => "Не обнаружено явных признаков эмулятора".to_string(),
        }
    }

    fn render_en(&self) -> String {
        match self {
            Self::UaKeyword { keyword } => format!("Suspicious User-Agent keyword: {keyword}"),
            Self::UaX86OnMobile => "x86 architecture in a mobile OS User-Agent".to_string(),
            Self::PlatformDesktopOnAndroid { platform } => {
                format!("Desktop platform \"{platform}\" with an Android User-Agent")
            }
            Self::PlatformX86OnAndroid { platform } => {
                format!("x86/x64 platform \"{platform}\" with an Android User-Agent")
            }
            Self::PlatformMismatchOnIos { platform } => {
                format!("Platform \"{platform}\" does not match an iOS User-Agent")
            }
            Self::ScreenResolution { width, height } => {
                format!("Screen resolution {width}x{height} is a common emulator default")
            }
            Self::PixelRatioUnusual { ratio } => format!("Unusual devicePixelRatio: {ratio}"),
            Self::PixelRatioOutOfRange { ratio } => {
                format!("devicePixelRatio outside the realistic range: {ratio}")
            }
            Self::ScreenTooLarge { pixels } => {
                format!("Screen too large for a mobile device: {pixels} pixels")
            }
            Self::CpuCoresLow { cores } => {
                format!("Too few CPU cores for a mobile device: {cores}")
            }
            Self::CpuCoresHigh { cores } => {
                format!("Too many CPU cores for a mobile device: {cores}")
            }
            Self::MemoryUnusual { gib } => format!("Unusual device memory: {gib} GiB"),
            Self::MemoryExcessive { gib } => format!("Excessive device memory: {gib} GiB"),
            Self::TouchMissing => "Mobile User-Agent without touch support".to_string(),
            Self::TouchPointsLow { points } => {
                format!("Too few touch points for a mobile device: {points}")
            }
            Self::TouchOnDesktop { points } => {
                format!("Touch input on a desktop User-Agent: {points} touch points")
            }
            Self::GpuKeyword { keyword } => format!("Virtual GPU indicator: {keyword}"),
            Self::GpuSoftwareRenderer => "Software or generic GPU renderer".to_string(),
            Self::GpuRendererMasked { renderer } => {
                format!("Suspiciously short or masked GPU name: \"{renderer}\"")
            }
            Self::NoIndicators => "No emulator indicators found".to_string(),
        }
    }
}
