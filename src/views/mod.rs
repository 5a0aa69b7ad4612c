//! Presentation layer
//!
//! Renders plain records into HTML pages. Views never touch the store; every
//! dynamic value is escaped on the way out.

pub mod pages;

pub use pages::*;

use crate::utils::helpers::escape_html;

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; background: #f4f4f4; margin: 0; padding: 20px; }
        nav { background: #333; padding: 10px; }
        nav a { color: white; margin: 0 10px; text-decoration: none; }
        .container { max-width: 1200px; margin: auto; background: white; padding: 20px; border-radius: 5px; }
        table { width: 100%; border-collapse: collapse; margin-top: 20px; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: center; }
        th { background: #f2f2f2; }
        button { background: #ff4d4d; color: white; border: none; padding: 5px 10px; cursor: pointer; }
        button:hover { background: #cc0000; }
        .stats { display: flex; gap: 20px; margin-bottom: 20px; }
        .error { color: #cc0000; font-weight: bold; }
        form.stack { display: flex; flex-direction: column; gap: 10px; }
        label { display: flex; align-items: center; gap: 10px; }
        input { padding: 5px; }
"#;

const NAV: &str = r#"    <nav>
        <a href="/">🏠 الرئيسية</a>
        <a href="/blacklist">🚫 القائمة السوداء</a>
        <a href="/groups">👥 إدارة المجموعات</a>
        <a href="/settings">⚙️ الإعدادات</a>
        <a href="/logout">🔓 تسجيل الخروج</a>
    </nav>
"#;

/// Wrap page content in the shared document shell
fn layout(title: &str, with_nav: bool, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
{nav}    <div class="container">
{content}
    </div>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        nav = if with_nav { NAV } else { "" },
        content = content,
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"        <p class="error">{}</p>"#, escape_html(message)))
        .unwrap_or_default()
}

/// Body shown when a store operation fails at the route boundary
pub fn store_error_text(message: &str) -> String {
    format!("❌ خطأ: {}", message)
}
