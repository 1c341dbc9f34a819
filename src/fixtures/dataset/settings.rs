use chrono::{DateTime, Duration, Utc};

use super::timestamp;
use crate::types::{Setting, SettingGroup};

#[derive(Debug, Clone, Copy)]
pub struct SettingFixture {
    pub key: &'static str,
    pub value: &'static str,
    pub group: SettingGroup,
}

const fn setting(key: &'static str, value: &'static str, group: SettingGroup) -> SettingFixture {
    SettingFixture { key, value, group }
}

pub(super) fn default_settings() -> Vec<SettingFixture> {
    use SettingGroup::*;

    vec![
        setting("title", "Heimdall Blog", General),
        setting("description", "A modern blog system", General),
        setting("logo", "", General),
        setting("favicon", "", General),
        setting("language", "zh-CN", General),
        setting("timezone", "Asia/Shanghai", General),
        setting("postsPerPage", "10", Display),
        setting("theme", "default", Display),
        setting("showExcerpts", "true", Display),
        setting("showReadingTime", "true", Display),
        setting("metaTitle", "Heimdall Blog - Notes on building software", Seo),
        setting("metaDescription", "Sharing engineering notes and lessons learned", Seo),
        setting("enableSitemap", "true", Seo),
        setting("enableRSS", "true", Seo),
        setting("twitter", "", Social),
        setting("github", "", Social),
        setting("enableComments", "true", Comments),
        setting("requireApproval", "true", Comments),
        setting("allowGuestComments", "true", Comments),
    ]
}

pub fn build_settings(fixtures: &[SettingFixture], now: DateTime<Utc>) -> Vec<Setting> {
    let at = timestamp(now, Duration::zero());
    fixtures
        .iter()
        .map(|f| Setting::new(f.key, f.value, f.group, at))
        .collect()
}
