//! 后端操作执行
//!
//! 主循环在重绘之后调用 `execute`，界面因此能先显示 Loading 状态。
//! 每个操作都先借出对应页面调用后端，落地结果后再写通知。

use bangumi_core::session::{CommitOutcome, PageOutcome};
use bangumi_core::types::Entry;

use crate::backend::CoreService;
use crate::message::Command;
use crate::model::state::SubjectPage;
use crate::model::{App, PageKind, PagePhase, CALENDAR_PAGE, SEARCH_PAGE, SUBJECT_PAGE};

/// 执行一个后端操作
pub fn execute(app: &mut App, backend: &CoreService, command: Command) {
    log::debug!("Executing {command:?}");
    match command {
        Command::LoadNextPage { page } => load_next_page(app, backend, &page),
        Command::RefreshList { page } => refresh_list(app, backend, &page),
        Command::OpenSubject { subject_id, origin } => {
            open_subject(app, backend, subject_id, &origin);
        }
        Command::ReloadSubject => reload_subject(app, backend),
        Command::ReloadCalendar => reload_calendar(app, backend),
        Command::Search { fresh } => search(app, backend, fresh),
        Command::CommitEdit => commit_edit(app, backend),
    }
}

// ========== 列表 ==========

fn load_next_page(app: &mut App, backend: &CoreService, name: &str) {
    let Some(page) = app
        .navigator
        .get_mut(name)
        .and_then(PageKind::as_collection_mut)
    else {
        return;
    };

    let result = backend.load_next_page(&mut page.list);
    page.phase = PagePhase::Ready;
    let (loaded, total) = (page.list.loaded_count(), page.list.total());

    match result {
        Ok(PageOutcome::Appended(n)) => app
            .notification
            .success(format!("Loaded {n} more ({loaded}/{total})")),
        Ok(PageOutcome::Exhausted) => app
            .notification
            .info(format!("All {loaded} entries loaded")),
        Err(e) => app.notification.error(format!("Failed to load more: {e}")),
    }
}

fn refresh_list(app: &mut App, backend: &CoreService, name: &str) {
    let Some(page) = app
        .navigator
        .get_mut(name)
        .and_then(PageKind::as_collection_mut)
    else {
        return;
    };

    let result = backend.refresh_list(&mut page.list);
    page.phase = PagePhase::Ready;
    page.clamp_selection();
    page.detail_scroll = 0;
    let label = page.status().label();

    match result {
        Ok(()) => app.notification.success(format!("{label} refreshed")),
        Err(e) => app
            .notification
            .error(format!("Failed to refresh {label}: {e}")),
    }
}

// ========== 条目详情 ==========

fn open_subject(app: &mut App, backend: &CoreService, subject_id: u32, origin: &str) {
    match backend.load_subject(subject_id) {
        Ok(data) => {
            let episodes_error = data.episodes_error.map(|e| e.to_string());
            let page = SubjectPage::new(
                data.subject,
                data.entry,
                data.collected,
                data.episodes,
                episodes_error.clone(),
            );
            app.navigator.register(PageKind::Subject(Box::new(page)));
            app.navigator.open_detail(SUBJECT_PAGE, origin);

            if let Some(e) = episodes_error {
                app.notification
                    .warn(format!("Failed to load episodes: {e}"));
            }
        }
        Err(e) => app
            .notification
            .error(format!("Failed to open subject {subject_id}: {e}")),
    }
}

fn reload_subject(app: &mut App, backend: &CoreService) {
    let Some(page) = app
        .navigator
        .get_mut(SUBJECT_PAGE)
        .and_then(PageKind::as_subject_mut)
    else {
        return;
    };

    let result = backend.load_subject(page.subject_id());
    page.phase = PagePhase::Ready;

    match result {
        Ok(data) => {
            let episodes_error = data.episodes_error.map(|e| e.to_string());
            page.reload(
                data.subject,
                data.entry,
                data.collected,
                data.episodes,
                episodes_error.clone(),
            );
            match episodes_error {
                Some(e) => app
                    .notification
                    .warn(format!("Failed to load episodes: {e}")),
                None => app.notification.success("Subject reloaded"),
            }
        }
        Err(e) => app
            .notification
            .error(format!("Failed to reload subject: {e}")),
    }
}

// ========== 放送表 ==========

fn reload_calendar(app: &mut App, backend: &CoreService) {
    let Some(page) = app
        .navigator
        .get_mut(CALENDAR_PAGE)
        .and_then(PageKind::as_calendar_mut)
    else {
        return;
    };

    let result = backend.load_calendar();
    match result {
        Ok(days) => {
            page.set_days(days);
            app.notification.success("Calendar refreshed");
        }
        Err(e) => {
            page.error = Some(e.to_string());
            app.notification
                .error(format!("Failed to load calendar: {e}"));
        }
    }
    if let Some(page) = app.navigator.get_mut(CALENDAR_PAGE) {
        page.set_phase(PagePhase::Ready);
    }
}

// ========== 搜索 ==========

fn search(app: &mut App, backend: &CoreService, fresh: bool) {
    let Some(page) = app
        .navigator
        .get_mut(SEARCH_PAGE)
        .and_then(PageKind::as_search_mut)
    else {
        return;
    };

    let (payload, offset) = if fresh {
        (page.input_payload(), 0)
    } else {
        match &page.payload {
            Some(payload) => (
                payload.clone(),
                u32::try_from(page.results.len()).unwrap_or(u32::MAX),
            ),
            None => {
                page.phase = PagePhase::Ready;
                return;
            }
        }
    };

    let result = backend.search(&payload, offset);
    page.phase = PagePhase::Ready;

    match result {
        Ok(results) => {
            page.apply_results(payload, results, fresh);
            let (shown, total) = (page.results.len(), page.total);
            if total == 0 {
                app.notification.info("No results");
            } else {
                app.notification
                    .success(format!("Showing {shown} of {total} results"));
            }
        }
        Err(e) => app.notification.error(format!("Search failed: {e}")),
    }
}

// ========== 编辑提交 ==========

fn commit_edit(app: &mut App, backend: &CoreService) {
    let Some(modal) = app.modal.get_mut() else {
        return;
    };

    let result = backend.commit(&modal.session);
    modal.saving = false;

    match result {
        Ok(outcome) => {
            let Some(modal) = app.modal.close() else {
                return;
            };
            let original = modal.session.original().clone();
            apply_commit(app, &modal.owner, &original, outcome);
        }
        Err(e) => {
            // 弹窗保留，可以修改后重试或放弃
            modal.error = Some(e.to_string());
            if e.is_partial() {
                app.notification.warn(format!("Partially saved: {e}"));
            } else {
                app.notification.error(format!("Save failed: {e}"));
            }
        }
    }
}

/// 把提交成功的记录落地到所属页面与对应的收藏列表
///
/// 状态改变时记录仍留在原列表中，只提示刷新。
pub(super) fn apply_commit(app: &mut App, owner: &str, original: &Entry, outcome: CommitOutcome) {
    let entry = outcome.entry;

    match app.navigator.get_mut(owner) {
        Some(PageKind::Collection(page)) => {
            page.apply_committed(entry.clone());
            page.phase = PagePhase::Ready;
        }
        Some(PageKind::Subject(page)) => {
            page.apply_committed(entry.clone());
            page.phase = PagePhase::Ready;
            if let Some(page) = original.status.and_then(|s| app.collection_page_mut(s)) {
                page.apply_committed(entry.clone());
            }
        }
        Some(page) => page.set_phase(PagePhase::Ready),
        None => {}
    }

    let name = entry.display_name().to_string();
    if entry.status != original.status {
        let label = entry.status.map_or("Uncollected", |s| s.label());
        app.notification
            .success(format!("Saved {name}: now {label}, press R to refresh lists"));
    } else if let Some(sync) = outcome.progress {
        app.notification
            .success(format!("Saved {name}: {} episodes watched", sync.done));
    } else {
        app.notification.success(format!("Saved {name}"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bangumi_core::services::ProgressSync;
    use bangumi_core::session::ListModel;
    use bangumi_core::types::{CollectionStatus, Paged, Subject, UserInfo};

    use super::*;
    use crate::model::state::CollectionPage;
    use crate::model::NotificationLevel;

    fn entry(id: u32, status: CollectionStatus) -> Entry {
        Entry {
            subject_id: id,
            status: Some(status),
            ..Entry::default()
        }
    }

    fn app_with_watching(ids: &[u32]) -> App {
        let mut app = App::new(UserInfo::default(), 20);
        for status in CollectionStatus::ALL {
            let mut list = ListModel::new("me", status, 20);
            if status == CollectionStatus::Watching {
                let data: Vec<Entry> = ids.iter().map(|&id| entry(id, status)).collect();
                let total = u32::try_from(data.len()).unwrap();
                list.apply_load(Paged::new(data, total, 0, 20));
            }
            app.navigator
                .register(PageKind::Collection(CollectionPage::new(list)));
        }
        app.navigator.goto("watching");
        app
    }

    fn outcome(entry: Entry) -> CommitOutcome {
        CommitOutcome {
            entry,
            info_updated: true,
            progress: None,
        }
    }

    fn watching_ids(app: &App) -> Vec<u32> {
        app.navigator
            .get("watching")
            .and_then(PageKind::as_collection)
            .unwrap()
            .list
            .entries()
            .iter()
            .map(|e| e.subject_id)
            .collect()
    }

    #[test]
    fn test_commit_from_list_moves_entry_to_front() {
        let mut app = app_with_watching(&[1, 2, 3]);
        let original = entry(3, CollectionStatus::Watching);
        let mut updated = original.clone();
        updated.rate = 9;

        apply_commit(&mut app, "watching", &original, outcome(updated));

        assert_eq!(watching_ids(&app), [3, 1, 2]);
        let level = app.notification.current().unwrap().level;
        assert_eq!(level, NotificationLevel::Success);
    }

    #[test]
    fn test_commit_from_subject_updates_original_bucket() {
        let mut app = app_with_watching(&[1, 2]);
        let subject = Subject {
            id: 2,
            ..Subject::default()
        };
        let mut page = SubjectPage::for_subject(subject);
        page.entry = entry(2, CollectionStatus::Watching);
        page.collected = true;
        page.phase = PagePhase::Editing;
        app.navigator.register(PageKind::Subject(Box::new(page)));
        app.navigator.open_detail(SUBJECT_PAGE, "watching");

        let original = entry(2, CollectionStatus::Watching);
        let mut updated = original.clone();
        updated.ep_status = 4;
        let outcome = CommitOutcome {
            entry: updated,
            info_updated: false,
            progress: Some(ProgressSync { done: 4, reset: 0 }),
        };

        apply_commit(&mut app, SUBJECT_PAGE, &original, outcome);

        let subject_page = app
            .navigator
            .get(SUBJECT_PAGE)
            .and_then(PageKind::as_subject)
            .unwrap();
        assert_eq!(subject_page.entry.ep_status, 4);
        assert!(subject_page.phase.is_ready());
        assert_eq!(watching_ids(&app), [2, 1]);
    }

    #[test]
    fn test_status_change_keeps_entry_in_old_bucket() {
        let mut app = app_with_watching(&[1, 2]);
        let original = entry(2, CollectionStatus::Watching);
        let mut updated = original.clone();
        updated.status = Some(CollectionStatus::Done);

        apply_commit(&mut app, "watching", &original, outcome(updated));

        assert_eq!(watching_ids(&app), [2, 1]);
        let text = &app.notification.current().unwrap().text;
        assert!(text.contains("press R"));
    }

    #[test]
    fn test_collecting_from_subject_leaves_lists_alone() {
        let mut app = app_with_watching(&[1]);
        let page = SubjectPage::for_subject(Subject {
            id: 8,
            ..Subject::default()
        });
        let original = page.entry.clone();
        app.navigator.register(PageKind::Subject(Box::new(page)));

        let mut updated = original.clone();
        updated.status = Some(CollectionStatus::Wish);
        apply_commit(&mut app, SUBJECT_PAGE, &original, outcome(updated));

        let subject_page = app
            .navigator
            .get(SUBJECT_PAGE)
            .and_then(PageKind::as_subject)
            .unwrap();
        assert!(subject_page.collected);
        assert_eq!(watching_ids(&app), [1]);
    }
}
