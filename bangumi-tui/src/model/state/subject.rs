//! 条目详情页面状态

use bangumi_core::types::{Entry, Episode, Subject};
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::event::scroll_keys;
use crate::message::AppMessage;
use crate::model::page::{Page, PagePhase, SUBJECT_PAGE};
use crate::view::pages;

/// 章节相对今天的放送状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeAirState {
    Aired,
    Today,
    Upcoming,
    /// 没有可解析的放送日期
    Unknown,
}

impl EpisodeAirState {
    pub fn of(episode: &Episode, today: NaiveDate) -> Self {
        match episode.air_date() {
            Some(date) if date < today => Self::Aired,
            Some(date) if date == today => Self::Today,
            Some(_) => Self::Upcoming,
            None => Self::Unknown,
        }
    }
}

/// 条目详情页面
#[derive(Debug)]
pub struct SubjectPage {
    pub subject: Subject,
    /// 用户的收藏（未收藏时为合成的默认记录）
    pub entry: Entry,
    pub collected: bool,
    pub episodes: Vec<Episode>,
    /// 章节读取失败的原因
    pub episodes_error: Option<String>,
    pub scroll: u16,
    pub today: NaiveDate,
    pub phase: PagePhase,
}

impl SubjectPage {
    pub fn new(
        subject: Subject,
        entry: Entry,
        collected: bool,
        episodes: Vec<Episode>,
        episodes_error: Option<String>,
    ) -> Self {
        Self {
            subject,
            entry,
            collected,
            episodes,
            episodes_error,
            scroll: 0,
            today: chrono::Local::now().date_naive(),
            phase: PagePhase::Ready,
        }
    }

    /// 只有条目信息、尚未收藏的页面
    #[cfg(test)]
    pub fn for_subject(subject: Subject) -> Self {
        let entry = Entry::placeholder(&subject);
        Self::new(subject, entry, false, Vec::new(), None)
    }

    pub fn subject_id(&self) -> u32 {
        self.subject.id
    }

    /// 用重新读取的数据替换内容，保留滚动位置
    pub fn reload(
        &mut self,
        subject: Subject,
        entry: Entry,
        collected: bool,
        episodes: Vec<Episode>,
        episodes_error: Option<String>,
    ) {
        self.subject = subject;
        self.entry = entry;
        self.collected = collected;
        self.episodes = episodes;
        self.episodes_error = episodes_error;
        self.today = chrono::Local::now().date_naive();
    }

    /// 提交成功后更新收藏
    pub fn apply_committed(&mut self, entry: Entry) {
        self.collected = entry.status.is_some() || self.collected;
        self.entry = entry;
    }

    pub fn air_state(&self, episode: &Episode) -> EpisodeAirState {
        EpisodeAirState::of(episode, self.today)
    }

    /// 本篇章节数
    pub fn main_episode_count(&self) -> usize {
        self.episodes.iter().filter(|e| e.is_main()).count()
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16, max: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(max);
    }
}

impl Page for SubjectPage {
    fn name(&self) -> &str {
        SUBJECT_PAGE
    }

    fn title(&self) -> String {
        self.subject.display_name().to_string()
    }

    fn handle_key(&self, key: KeyEvent) -> AppMessage {
        scroll_keys(key)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        pages::subject::render(self, frame, area);
    }

    fn is_detail(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bangumi_core::types::CollectionStatus;

    use super::*;

    fn episode(airdate: &str) -> Episode {
        Episode {
            airdate: airdate.to_string(),
            ..Episode::default()
        }
    }

    #[test]
    fn test_air_state_against_today() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        assert_eq!(EpisodeAirState::of(&episode("2024-04-09"), today), EpisodeAirState::Aired);
        assert_eq!(EpisodeAirState::of(&episode("2024-04-10"), today), EpisodeAirState::Today);
        assert_eq!(EpisodeAirState::of(&episode("2024-04-11"), today), EpisodeAirState::Upcoming);
        assert_eq!(EpisodeAirState::of(&episode(""), today), EpisodeAirState::Unknown);
    }

    #[test]
    fn test_uncollected_page_uses_placeholder() {
        let subject = Subject {
            id: 7,
            name: "Frieren".to_string(),
            ..Subject::default()
        };
        let page = SubjectPage::for_subject(subject);
        assert!(!page.collected);
        assert_eq!(page.entry.subject_id, 7);
        assert!(page.entry.status.is_none());
        assert!(page.is_detail());
    }

    #[test]
    fn test_commit_marks_collected() {
        let mut page = SubjectPage::for_subject(Subject {
            id: 7,
            ..Subject::default()
        });
        let mut entry = page.entry.clone();
        entry.status = Some(CollectionStatus::Wish);
        page.apply_committed(entry);
        assert!(page.collected);
        assert_eq!(page.entry.status, Some(CollectionStatus::Wish));
    }
}
