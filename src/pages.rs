use crate::models::Prize;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const ADMIN_TEMPLATE: &str = include_str!("../templates/admin.html");

pub const WHEEL_SCRIPT: &str = include_str!("../static/wheel.js");
pub const ADMIN_SCRIPT: &str = include_str!("../static/admin.js");

/// 转盘页面 (奖品数据由前端通过 /prizes 获取)
pub fn render_index() -> &'static str {
    INDEX_TEMPLATE
}

/// 管理页面: 每个奖品渲染为一行可编辑表单
pub fn render_admin(prizes: &[Prize]) -> String {
    let rows = prizes
        .iter()
        .map(render_prize_row)
        .collect::<Vec<_>>()
        .join("\n");
    ADMIN_TEMPLATE.replace("{{prize_rows}}", &rows)
}

fn render_prize_row(prize: &Prize) -> String {
    format!(
        concat!(
            "            <tr>",
            "<td><input type=\"text\" value=\"{}\"></td>",
            "<td><input type=\"number\" step=\"0.01\" min=\"0\" value=\"{}\"></td>",
            "<td><input type=\"number\" min=\"0\" value=\"{}\"></td>",
            "<td><button class=\"delete-btn\">Delete</button></td>",
            "</tr>"
        ),
        escape_html(&prize.name),
        prize.weight,
        prize.remaining_uses
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
