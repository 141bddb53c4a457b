//! 编辑弹窗更新逻辑

use crate::message::{Command, ModalMessage};
use crate::model::state::EditField;
use crate::model::{App, PagePhase};

/// 处理弹窗消息
pub fn update(app: &mut App, msg: ModalMessage) {
    let Some(modal) = app.modal.get_mut() else {
        return;
    };
    // 提交进行中只允许等待
    if modal.saving {
        return;
    }

    match msg {
        ModalMessage::Close => close(app),

        ModalMessage::NextField => modal.next_field(),
        ModalMessage::PrevField => modal.prev_field(),
        ModalMessage::Left => modal.left(),
        ModalMessage::Right => modal.right(),
        ModalMessage::Input(c) => modal.input(c),
        ModalMessage::Backspace => modal.backspace(),

        ModalMessage::Confirm => {
            if modal.focus == EditField::Cancel {
                close(app);
            } else if !modal.is_dirty() {
                close(app);
                app.notification.info("Nothing changed");
            } else {
                modal.saving = true;
                modal.error = None;
                app.notification.info("Saving...");
                app.schedule(Command::CommitEdit);
            }
        }
    }
}

/// 放弃修改并关闭弹窗，所属页面回到 Ready
pub(super) fn close(app: &mut App) {
    let Some(modal) = app.modal.close() else {
        return;
    };
    let original = modal.session.cancel();
    log::debug!("Edit of subject {} cancelled", original.subject_id);
    if let Some(page) = app.navigator.get_mut(&modal.owner) {
        page.set_phase(PagePhase::Ready);
    }
}
