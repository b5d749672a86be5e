//! Named device profiles for mobile and tablet emulation.
//!
//! Names follow the labels commonly used by browser automation tools
//! ("iPhone X", "Pixel 5", ...) and are matched exactly, case included.

/// A preset bundling viewport, pixel density, user agent and input emulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub name: &'static str,
    pub user_agent: &'static str,
    pub width: u32,
    pub height: u32,
    pub device_scale_factor: f64,
    pub is_mobile: bool,
    pub has_touch: bool,
}

const IOS_7_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 7_1_2 like Mac OS X) AppleWebKit/537.51.2 (KHTML, like Gecko) Version/7.0 Mobile/11D257 Safari/9537.53";
const IOS_10_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 10_3_1 like Mac OS X) AppleWebKit/603.1.30 (KHTML, like Gecko) Version/10.0 Mobile/14E304 Safari/602.1";
const IOS_11_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 11_0 like Mac OS X) AppleWebKit/604.1.38 (KHTML, like Gecko) Version/11.0 Mobile/15A372 Safari/604.1";
const IOS_12_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 12_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/12.0 Mobile/15E148 Safari/604.1";
const IOS_13_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 13_7 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/13.1 Mobile/15E148 Safari/604.1";
const IOS_14_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Mobile/15E148 Safari/604.1";
const IOS_15_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.0 Mobile/15E148 Safari/604.1";
const IOS_16_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1";
const IOS_17_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
const IPAD_UA: &str = "Mozilla/5.0 (iPad; CPU OS 11_0 like Mac OS X) AppleWebKit/604.1.34 (KHTML, like Gecko) Version/11.0 Mobile/15A5341f Safari/604.1";
const IPAD_12_UA: &str = "Mozilla/5.0 (iPad; CPU OS 12_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/12.1 Mobile/15E148 Safari/604.1";
const IPAD_13_UA: &str = "Mozilla/5.0 (iPad; CPU OS 13_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/13.0.3 Mobile/15E148 Safari/604.1";
const ANDROID_4_UA: &str = "Mozilla/5.0 (Linux; Android 4.4.4; Nexus 10 Build/KTU84P) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Safari/537.36";
const NEXUS_6_UA: &str = "Mozilla/5.0 (Linux; Android 7.1.1; Nexus 6 Build/N6F26U) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Mobile Safari/537.36";

const fn phone(
    name: &'static str,
    user_agent: &'static str,
    width: u32,
    height: u32,
    device_scale_factor: f64,
) -> DeviceProfile {
    DeviceProfile {
        name,
        user_agent,
        width,
        height,
        device_scale_factor,
        is_mobile: true,
        has_touch: true,
    }
}

// Expands each entry into its portrait profile followed by a
// "<name> landscape" profile with the dimensions swapped
macro_rules! device_catalog {
    ($($name:literal => ($ua:expr, $width:literal, $height:literal, $scale:literal)),* $(,)?) => {
        &[
            $(
                phone($name, $ua, $width, $height, $scale),
                phone(concat!($name, " landscape"), $ua, $height, $width, $scale),
            )*
        ]
    };
}

pub static DEVICES: &[DeviceProfile] = device_catalog![
    "Blackberry PlayBook" => ("Mozilla/5.0 (PlayBook; U; RIM Tablet OS 2.1.0; en-US) AppleWebKit/536.2+ (KHTML like Gecko) Version/7.2.1.0 Safari/536.2+", 600, 1024, 1.0),
    "BlackBerry Z30" => ("Mozilla/5.0 (BB10; Touch) AppleWebKit/537.10+ (KHTML, like Gecko) Version/10.0.9.2372 Mobile Safari/537.10+", 360, 640, 2.0),
    "Galaxy Note 3" => ("Mozilla/5.0 (Linux; U; Android 4.3; en-us; SM-N900T Build/JSS15J) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30", 360, 640, 3.0),
    "Galaxy Note II" => ("Mozilla/5.0 (Linux; U; Android 4.1; en-us; GT-N7100 Build/JRO03C) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30", 360, 640, 2.0),
    "Galaxy S III" => ("Mozilla/5.0 (Linux; U; Android 4.0; en-us; GT-I9300 Build/IMM76D) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30", 360, 640, 2.0),
    "Galaxy S5" => ("Mozilla/5.0 (Linux; Android 5.0; SM-G900P Build/LRX21T) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Mobile Safari/537.36", 360, 640, 3.0),
    "Galaxy S8" => ("Mozilla/5.0 (Linux; Android 7.0; SM-G950U Build/NRD90M) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/62.0.3202.84 Mobile Safari/537.36", 360, 740, 3.0),
    "Galaxy S9+" => ("Mozilla/5.0 (Linux; Android 8.0.0; SM-G965U Build/R16NW) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.111 Mobile Safari/537.36", 320, 658, 4.5),
    "Galaxy Tab S4" => ("Mozilla/5.0 (Linux; Android 8.1.0; SM-T837A) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.80 Safari/537.36", 712, 1138, 2.25),
    "iPad" => (IPAD_UA, 768, 1024, 2.0),
    "iPad (gen 6)" => (IPAD_12_UA, 768, 1024, 2.0),
    "iPad (gen 7)" => (IPAD_13_UA, 810, 1080, 2.0),
    "iPad Mini" => (IPAD_UA, 768, 1024, 2.0),
    "iPad Pro" => (IPAD_UA, 1024, 1366, 2.0),
    "iPad Pro 11" => (IPAD_12_UA, 834, 1194, 2.0),
    "iPhone 4" => (IOS_7_UA, 320, 480, 2.0),
    "iPhone 5" => (IOS_10_UA, 320, 568, 2.0),
    "iPhone 6" => (IOS_11_UA, 375, 667, 2.0),
    "iPhone 6 Plus" => (IOS_11_UA, 414, 736, 3.0),
    "iPhone 7" => (IOS_11_UA, 375, 667, 2.0),
    "iPhone 7 Plus" => (IOS_11_UA, 414, 736, 3.0),
    "iPhone 8" => (IOS_11_UA, 375, 667, 2.0),
    "iPhone 8 Plus" => (IOS_11_UA, 414, 736, 3.0),
    "iPhone SE" => (IOS_10_UA, 320, 568, 2.0),
    "iPhone X" => (IOS_11_UA, 375, 812, 3.0),
    "iPhone XR" => (IOS_12_UA, 414, 896, 3.0),
    "iPhone 11" => (IOS_13_UA, 414, 828, 2.0),
    "iPhone 11 Pro" => (IOS_13_UA, 375, 812, 3.0),
    "iPhone 11 Pro Max" => (IOS_13_UA, 414, 896, 3.0),
    "iPhone 12" => (IOS_14_UA, 390, 844, 3.0),
    "iPhone 12 Pro" => (IOS_14_UA, 390, 844, 3.0),
    "iPhone 12 Pro Max" => (IOS_14_UA, 428, 926, 3.0),
    "iPhone 12 Mini" => (IOS_14_UA, 375, 812, 3.0),
    "iPhone 13" => (IOS_15_UA, 390, 844, 3.0),
    "iPhone 13 Pro" => (IOS_15_UA, 390, 844, 3.0),
    "iPhone 13 Pro Max" => (IOS_15_UA, 428, 926, 3.0),
    "iPhone 13 Mini" => (IOS_15_UA, 375, 812, 3.0),
    "iPhone 14" => (IOS_16_UA, 390, 663, 3.0),
    "iPhone 14 Plus" => (IOS_16_UA, 428, 745, 3.0),
    "iPhone 14 Pro" => (IOS_16_UA, 393, 659, 3.0),
    "iPhone 14 Pro Max" => (IOS_16_UA, 430, 739, 3.0),
    "iPhone 15" => (IOS_17_UA, 393, 659, 3.0),
    "iPhone 15 Plus" => (IOS_17_UA, 430, 739, 3.0),
    "iPhone 15 Pro" => (IOS_17_UA, 393, 659, 3.0),
    "iPhone 15 Pro Max" => (IOS_17_UA, 430, 739, 3.0),
    "JioPhone 2" => ("Mozilla/5.0 (Mobile; LYF/F300B/LYF-F300B-001-01-15-130718-i;Android; rv:48.0) Gecko/48.0 Firefox/48.0 KAIOS/2.5", 240, 320, 1.0),
    "Kindle Fire HDX" => ("Mozilla/5.0 (Linux; U; en-us; KFAPWI Build/JDQ39) AppleWebKit/535.19 (KHTML, like Gecko) Silk/3.13 Safari/535.19 Silk-Accelerated=true", 800, 1280, 2.0),
    "LG Optimus L70" => ("Mozilla/5.0 (Linux; U; Android 4.4.2; en-us; LGMS323 Build/KOT49I.MS32310c) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/75.0.3765.0 Mobile Safari/537.36", 384, 640, 1.25),
    "Microsoft Lumia 550" => ("Mozilla/5.0 (Windows Phone 10.0; Android 4.2.1; Microsoft; Lumia 550) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/42.0.2311.135 Mobile Safari/537.36 Edge/14.14263", 640, 360, 2.0),
    "Microsoft Lumia 950" => ("Mozilla/5.0 (Windows Phone 10.0; Android 4.2.1; Microsoft; Lumia 950) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/42.0.2311.135 Mobile Safari/537.36 Edge/13.10586", 360, 640, 4.0),
    "Nexus 10" => (ANDROID_4_UA, 800, 1280, 2.0),
    "Nexus 4" => ("Mozilla/5.0 (Linux; Android 4.4.2; Nexus 4 Build/KOT49H) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Mobile Safari/537.36", 384, 640, 2.0),
    "Nexus 5" => ("Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Mobile Safari/537.36", 360, 640, 3.0),
    "Nexus 5X" => ("Mozilla/5.0 (Linux; Android 8.0.0; Nexus 5X Build/OPR4.170623.006) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Mobile Safari/537.36", 412, 732, 2.625),
    "Nexus 6" => (NEXUS_6_UA, 412, 732, 3.5),
    "Nexus 6P" => ("Mozilla/5.0 (Linux; Android 8.0.0; Nexus 6P Build/OPP3.170518.006) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Mobile Safari/537.36", 412, 732, 3.5),
    "Nexus 7" => ("Mozilla/5.0 (Linux; Android 6.0.1; Nexus 7 Build/MOB30X) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Safari/537.36", 600, 960, 2.0),
    "Nokia Lumia 520" => ("Mozilla/5.0 (compatible; MSIE 10.0; Windows Phone 8.0; Trident/6.0; IEMobile/10.0; ARM; Touch; NOKIA; Lumia 520)", 320, 533, 1.5),
    "Nokia N9" => ("Mozilla/5.0 (MeeGo; NokiaN9) AppleWebKit/534.13 (KHTML, like Gecko) NokiaBrowser/8.5.0 Mobile Safari/534.13", 480, 854, 1.0),
    "Pixel 2" => ("Mozilla/5.0 (Linux; Android 8.0; Pixel 2 Build/OPD3.170816.012) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Mobile Safari/537.36", 411, 731, 2.625),
    "Pixel 2 XL" => ("Mozilla/5.0 (Linux; Android 8.0.0; Pixel 2 XL Build/OPD1.170816.004) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Mobile Safari/537.36", 411, 823, 3.5),
    "Pixel 3" => ("Mozilla/5.0 (Linux; Android 9; Pixel 3 Build/PQ1A.181105.017.A1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/66.0.3359.158 Mobile Safari/537.36", 393, 786, 2.75),
    "Pixel 4" => ("Mozilla/5.0 (Linux; Android 10; Pixel 4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/81.0.4044.138 Mobile Safari/537.36", 353, 745, 3.0),
    "Pixel 4a (5G)" => ("Mozilla/5.0 (Linux; Android 11; Pixel 4a (5G)) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.91 Mobile Safari/537.36", 353, 745, 3.0),
    "Pixel 5" => ("Mozilla/5.0 (Linux; Android 11; Pixel 5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.91 Mobile Safari/537.36", 393, 851, 2.75),
    "Moto G4" => ("Mozilla/5.0 (Linux; Android 7.0; Moto G (4)) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3765.0 Mobile Safari/537.36", 360, 640, 3.0),
];

/// Looks up a device profile by its exact name
pub fn find_device(name: &str) -> Option<&'static DeviceProfile> {
    DEVICES.iter().find(|device| device.name == name)
}

/// All supported device names in catalog order
pub fn device_names() -> Vec<&'static str> {
    DEVICES.iter().map(|device| device.name).collect()
}

impl DeviceProfile {
    /// Chrome `mobileEmulation` capability for this profile
    pub fn mobile_emulation(&self) -> serde_json::Value {
        serde_json::json!({
            "deviceMetrics": {
                "width": self.width,
                "height": self.height,
                "pixelRatio": self.device_scale_factor,
                "mobile": self.is_mobile,
                "touch": self.has_touch,
            },
            "userAgent": self.user_agent,
        })
    }
}
