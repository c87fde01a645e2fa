//! Localized UI strings for the site's pages.

use serde::Serialize;

/// All localized user-facing strings for a locale
///
/// Strings are stored raw; escaping is left to whatever renders them.
#[derive(Debug, Clone, Serialize)]
pub struct SiteStrings {
    // ==================== Metadata ====================
    /// Document title
    pub meta_title: &'static str,

    /// Document description (also used for Open Graph)
    pub meta_description: &'static str,

    // ==================== Navigation ====================
    pub nav_brand: &'static str,
    pub nav_home: &'static str,
    pub nav_about: &'static str,
    pub nav_projects: &'static str,
    pub nav_contact: &'static str,
    pub nav_resume: &'static str,

    // ==================== Sections ====================
    pub hero_title: &'static str,
    pub hero_description: &'static str,
    pub about_title: &'static str,
    pub projects_title: &'static str,
    pub contact_title: &'static str,
    pub contact_description: &'static str,
    pub resume_title: &'static str,

    // ==================== Contact Form ====================
    pub form_name: &'static str,
    pub form_email: &'static str,
    pub form_message: &'static str,
    pub form_button: &'static str,
    pub form_success: &'static str,
    pub form_error: &'static str,
}

impl SiteStrings {
    /// Strings for a locale code, falling back to English for codes
    /// without a translation.
    pub fn for_locale(code: &str) -> &'static SiteStrings {
        match code {
            "vi" => &VIETNAMESE_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: SiteStrings = SiteStrings {
    meta_title: "Portfolio | Software Developer",
    meta_description: "Projects, experience and contact details of a software developer.",

    nav_brand: "Portfolio",
    nav_home: "Home",
    nav_about: "About",
    nav_projects: "Projects",
    nav_contact: "Contact",
    nav_resume: "Resume",

    hero_title: "Hi, I build things for the web",
    hero_description: "I design and develop fast, accessible web applications.",
    about_title: "About me",
    projects_title: "Featured projects",
    contact_title: "Get in touch",
    contact_description: "Have a project in mind? Send me a message.",
    resume_title: "Resume",

    form_name: "Name",
    form_email: "Email",
    form_message: "Message",
    form_button: "Send message",
    form_success: "Thanks! Your message has been sent.",
    form_error: "Something went wrong. Please try again.",
};

// ==================== Vietnamese Strings ====================

pub const VIETNAMESE_STRINGS: SiteStrings = SiteStrings {
    meta_title: "Portfolio | Lập trình viên",
    meta_description: "Dự án, kinh nghiệm và thông tin liên hệ của một lập trình viên.",

    nav_brand: "Portfolio",
    nav_home: "Trang chủ",
    nav_about: "Giới thiệu",
    nav_projects: "Dự án",
    nav_contact: "Liên hệ",
    nav_resume: "Hồ sơ",

    hero_title: "Xin chào, tôi xây dựng sản phẩm cho web",
    hero_description: "Tôi thiết kế và phát triển các ứng dụng web nhanh và dễ tiếp cận.",
    about_title: "Về tôi",
    projects_title: "Dự án nổi bật",
    contact_title: "Liên hệ với tôi",
    contact_description: "Bạn có ý tưởng dự án? Hãy gửi tin nhắn cho tôi.",
    resume_title: "Hồ sơ",

    form_name: "Tên",
    form_email: "Email",
    form_message: "Nội dung",
    form_button: "Gửi tin nhắn",
    form_success: "Cảm ơn! Tin nhắn của bạn đã được gửi.",
    form_error: "Đã có lỗi xảy ra. Vui lòng thử lại.",
};
