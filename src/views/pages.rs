//! Page renderers

use std::fmt::Write;
use crate::models::{AllowedChat, BlacklistEntry, Dashboard, ModerationSettings, UserDetail};
use crate::utils::helpers::{escape_html, or_missing, MISSING};
use super::{error_block, layout};

pub const LOGIN_ERROR: &str = "❌ اسم المستخدم أو كلمة المرور خاطئة";
pub const CHAT_ID_ERROR: &str = "❌ معرف المجموعة يجب أن يكون رقمًا";

fn optional_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| MISSING.to_string())
}

pub fn login_page(error: Option<&str>) -> String {
    let content = format!(
        r#"        <h1>🔐 تسجيل الدخول</h1>
{error}
        <form class="stack" action="/login" method="POST">
            <input type="text" name="username" placeholder="اسم المستخدم" required>
            <input type="password" name="password" placeholder="كلمة المرور" required>
            <button type="submit">دخول</button>
        </form>"#,
        error = error_block(error),
    );
    layout("تسجيل الدخول", false, &content)
}

pub fn dashboard_page(dashboard: &Dashboard) -> String {
    let mut rows = String::new();
    for user in &dashboard.verified {
        let user_id = optional_id(user.user_id);
        let _ = write!(
            rows,
            r#"
            <tr>
                <td><a href="/user/{user_id}">{user_id}</a></td>
                <td>{first_name}</td>
                <td>{username}</td>
                <td>{verified_at}</td>
                <td>
                    <form action="/delete/{doc_id}" method="POST">
                        <button type="submit">🗑️</button>
                    </form>
                </td>
            </tr>"#,
            user_id = escape_html(&user_id),
            first_name = escape_html(&user.first_name),
            username = escape_html(or_missing(&user.username)),
            verified_at = escape_html(&user.verified_at_label()),
            doc_id = escape_html(&user.doc_id),
        );
    }

    let content = format!(
        r#"        <h1>🛡️ GhostShield - لوحة تحكم البوت</h1>
        <div class="stats">
            <p>✅ تم التحقق من: {verified_count} مستخدم</p>
            <p>🚫 عدد المخالفات: {violations}</p>
        </div>
        <form action="/clear" method="POST">
            <button type="submit">🗑️ حذف جميع سجلات التحقق</button>
        </form>
        <h2>📋 المستخدمون الذين تم التحقق منهم:</h2>
        <table>
            <tr>
                <th>🆔 ID</th>
                <th>👤 الاسم</th>
                <th>🔗 اسم المستخدم</th>
                <th>📅 وقت التحقق</th>
                <th>🗑️ حذف</th>
            </tr>{rows}
        </table>"#,
        verified_count = dashboard.verified.len(),
        violations = dashboard.violation_count,
        rows = rows,
    );
    layout("GhostShield - لوحة التحكم", true, &content)
}

pub fn blacklist_page(entries: &[BlacklistEntry]) -> String {
    let mut rows = String::new();
    for entry in entries {
        let _ = write!(
            rows,
            r#"
            <tr>
                <td>{user_id}</td>
                <td>{added_at}</td>
                <td>
                    <form action="/blacklist/delete/{doc_id}" method="POST">
                        <button type="submit">🗑️</button>
                    </form>
                </td>
            </tr>"#,
            user_id = escape_html(&optional_id(entry.user_id)),
            added_at = escape_html(&entry.added_at_label()),
            doc_id = escape_html(&entry.doc_id),
        );
    }

    let content = format!(
        r#"        <h1>🚫 القائمة السوداء</h1>
        <table>
            <tr>
                <th>🆔 ID</th>
                <th>🕒 وقت الإضافة</th>
                <th>🗑️ حذف</th>
            </tr>{rows}
        </table>"#,
        rows = rows,
    );
    layout("القائمة السوداء", true, &content)
}

pub fn groups_page(chats: &[AllowedChat], error: Option<&str>) -> String {
    let mut rows = String::new();
    for chat in chats {
        let _ = write!(
            rows,
            r#"
            <tr>
                <td>{chat_id}</td>
                <td>{added_at}</td>
                <td>
                    <form action="/groups/delete/{chat_id}" method="POST">
                        <button type="submit">🗑️</button>
                    </form>
                </td>
            </tr>"#,
            chat_id = chat.chat_id,
            added_at = escape_html(&chat.added_at_label()),
        );
    }

    let content = format!(
        r#"        <h1>👥 إدارة المجموعات</h1>
{error}
        <form action="/groups/add" method="POST">
            <input type="text" name="chat_id" placeholder="أدخل معرف المجموعة" required>
            <button type="submit">➕ إضافة مجموعة</button>
        </form>
        <h2>📋 المجموعات المسموح بها:</h2>
        <table>
            <tr>
                <th>🆔 معرف المجموعة</th>
                <th>🕒 وقت الإضافة</th>
                <th>🗑️ حذف</th>
            </tr>{rows}
        </table>"#,
        error = error_block(error),
        rows = rows,
    );
    layout("إدارة المجموعات", true, &content)
}

pub fn user_page(detail: &UserDetail) -> String {
    let content = format!(
        r#"        <h1>👤 معلومات المستخدم</h1>
        <p><strong>الاسم:</strong> {first_name}</p>
        <p><strong>اسم المستخدم:</strong> {username}</p>
        <p><strong>المعرف:</strong> {user_id}</p>
        <p><strong>عدد المخالفات:</strong> {violations}</p>
        <p><strong>في البلاك ليست؟</strong> {in_blacklist}</p>"#,
        first_name = escape_html(&detail.user.first_name),
        username = escape_html(&detail.user.username),
        user_id = detail.user.user_id,
        violations = detail.violation_count,
        in_blacklist = if detail.in_blacklist { "✅" } else { "❌" },
    );
    layout("معلومات المستخدم", true, &content)
}

pub fn user_error_page(message: &str) -> String {
    let content = format!(
        "        <h1>👤 معلومات المستخدم</h1>\n{}",
        error_block(Some(message))
    );
    layout("معلومات المستخدم", true, &content)
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"            <label><input type="checkbox" name="{name}"{checked}> {label}</label>"#,
        name = name,
        checked = if checked { " checked" } else { "" },
        label = label,
    )
}

pub fn settings_page(settings: &ModerationSettings, saved: bool) -> String {
    let notice = if saved {
        "        <p>✅ تم حفظ الإعدادات</p>"
    } else {
        ""
    };
    let content = format!(
        r#"        <h1>⚙️ إعدادات النظام</h1>
{notice}
        <form class="stack" action="/settings" method="POST">
{night_mode}
{block_media}
{kick_links}
{verify_new_users}
            <button type="submit">💾 حفظ الإعدادات</button>
        </form>"#,
        notice = notice,
        night_mode = checkbox("night_mode", "🌙 الوضع الليلي", settings.night_mode),
        block_media = checkbox("block_media", "🖼️ منع الوسائط", settings.block_media),
        kick_links = checkbox("kick_links", "🔗 طرد ناشري الروابط", settings.kick_links),
        verify_new_users = checkbox("verify_new_users", "✅ التحقق من الأعضاء الجدد", settings.verify_new_users),
    );
    layout("إعدادات النظام", true, &content)
}
