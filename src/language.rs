// 🌐 Language Tables - zh / ja localization
// Two fixed tables; every static UI string lives here

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// LANGUAGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Zh,
    Ja,
}

#[derive(Debug, Error)]
#[error("unknown language tag: {0}")]
pub struct LanguageParseError(pub String);

impl Language {
    /// Startup detection: the Japanese page variant carries `-jp` in its path
    pub fn from_page_path(path: &str) -> Self {
        if path.contains("-jp") {
            Language::Ja
        } else {
            Language::Zh
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Language::Zh => Language::Ja,
            Language::Ja => Language::Zh,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::Ja => "ja",
        }
    }

    pub fn data_file_name(&self) -> &'static str {
        match self {
            Language::Zh => "beaches.json",
            Language::Ja => "beaches_ja.json",
        }
    }

    /// Path of this language's page variant
    pub fn page_path(&self) -> &'static str {
        match self {
            Language::Zh => "/",
            Language::Ja => "/index-jp.html",
        }
    }

    pub fn strings(&self) -> &'static UiStrings {
        match self {
            Language::Zh => &ZH,
            Language::Ja => &JA,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" => Ok(Language::Zh),
            "ja" | "jp" => Ok(Language::Ja),
            _ => Err(LanguageParseError(s.to_string())),
        }
    }
}

// ============================================================================
// LOCALIZATION TABLE
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
pub struct UiStrings {
    pub page_title: &'static str,
    pub heading: &'static str,
    pub subtitle: &'static str,
    pub search_placeholder: &'static str,
    pub lifeguard_label: &'static str,
    pub shower_label: &'static str,
    pub fee_label: &'static str,
    pub option_all: &'static str,
    pub option_yes: &'static str,
    pub option_no: &'static str,
    pub option_free: &'static str,
    pub option_paid: &'static str,
    pub reset_button: &'static str,
    /// Label of the toggle control (names the other language)
    pub toggle_label: &'static str,
    pub col_name: &'static str,
    pub col_address: &'static str,
    pub col_open_time: &'static str,
    pub col_lifeguard: &'static str,
    pub col_shower: &'static str,
    pub col_fee: &'static str,
    pub col_note: &'static str,
    pub result_count: &'static str,
    pub no_results: &'static str,
    pub footer: &'static str,
    pub region: &'static str,
    pub badge_has: &'static str,
    pub badge_has_not: &'static str,
    pub badge_free: &'static str,
    pub badge_paid: &'static str,
    pub popup_blocked: &'static str,
    pub map_error: &'static str,
    pub loading: &'static str,
    pub key_help: &'static str,
}

pub static ZH: UiStrings = UiStrings {
    page_title: "冲绳海滩信息一览",
    heading: "冲绳海滩指南",
    subtitle: "查找有救生员、淋浴设施的海滩，了解开放时间与收费情况",
    search_placeholder: "搜索海滩名称或地址...",
    lifeguard_label: "安全员",
    shower_label: "淋浴间",
    fee_label: "费用",
    option_all: "全部",
    option_yes: "有",
    option_no: "无",
    option_free: "免费",
    option_paid: "收费",
    reset_button: "重置筛选",
    toggle_label: "日本語",
    col_name: "海滩名称",
    col_address: "地址",
    col_open_time: "开放时间",
    col_lifeguard: "安全员",
    col_shower: "淋浴间",
    col_fee: "费用",
    col_note: "备注",
    result_count: "找到海滩数量",
    no_results: "没有找到符合条件的海滩",
    footer: "海滩信息仅供参考，出行前请确认最新的开放情况。",
    region: "冲绳",
    badge_has: "有",
    badge_has_not: "无",
    badge_free: "免费",
    badge_paid: "收费",
    popup_blocked: "请允许弹窗或手动打开以下链接:",
    map_error: "打开地图时发生错误，请稍后重试",
    loading: "正在加载海滩数据...",
    key_help: "/ 搜索 | l 安全员 | s 淋浴间 | f 费用 | r 重置 | t 日本語 | o 地图 | q 退出",
};

pub static JA: UiStrings = UiStrings {
    page_title: "沖縄ビーチ情報一覧",
    heading: "沖縄ビーチガイド",
    subtitle: "監視員やシャワーのあるビーチを探して、営業時間と料金を確認しましょう",
    search_placeholder: "ビーチ名または住所で検索...",
    lifeguard_label: "監視員",
    shower_label: "シャワー",
    fee_label: "料金",
    option_all: "すべて",
    option_yes: "あり",
    option_no: "なし",
    option_free: "無料",
    option_paid: "有料",
    reset_button: "リセット",
    toggle_label: "中文",
    col_name: "ビーチ名",
    col_address: "住所",
    col_open_time: "営業時間",
    col_lifeguard: "監視員",
    col_shower: "シャワー",
    col_fee: "料金",
    col_note: "備考",
    result_count: "該当ビーチ数",
    no_results: "条件に一致するビーチが見つかりません",
    footer: "ビーチ情報は参考用です。お出かけ前に最新の営業状況をご確認ください。",
    region: "沖縄",
    badge_has: "あり",
    badge_has_not: "なし",
    badge_free: "無料",
    badge_paid: "有料",
    popup_blocked: "ポップアップを許可するか、次のリンクを手動で開いてください:",
    map_error: "地図を開く際にエラーが発生しました。しばらくしてから再度お試しください",
    loading: "ビーチデータを読み込み中...",
    key_help: "/ 検索 | l 監視員 | s シャワー | f 料金 | r リセット | t 中文 | o 地図 | q 終了",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_path_detection() {
        assert_eq!(Language::from_page_path("/index-jp.html"), Language::Ja);
        assert_eq!(Language::from_page_path("/index.html"), Language::Zh);
        assert_eq!(Language::from_page_path(""), Language::Zh);
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Language::Zh.toggle(), Language::Ja);
        assert_eq!(Language::Zh.toggle().toggle(), Language::Zh);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Zh);
        assert_eq!("JA".parse::<Language>().unwrap(), Language::Ja);
        assert_eq!("jp".parse::<Language>().unwrap(), Language::Ja);
        assert!("en".parse::<Language>().is_err());
    }

    #[test]
    fn test_page_path_round_trips_through_detection() {
        for lang in [Language::Zh, Language::Ja] {
            assert_eq!(Language::from_page_path(lang.page_path()), lang);
        }
    }

    #[test]
    fn test_region_labels() {
        assert_eq!(Language::Zh.strings().region, "冲绳");
        assert_eq!(Language::Ja.strings().region, "沖縄");
        assert_ne!(Language::Zh.strings(), Language::Ja.strings());
    }
}
