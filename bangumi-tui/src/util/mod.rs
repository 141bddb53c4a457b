//!
//! src/util/mod.rs
//! Util 层：基础设施和工具函数
//!
//! 与业务无关的代码放在这里：
//!     mod terminal;       // 终端初始化和恢复
//!     mod logging;        // 文件日志
//!     mod text;           // 按显示宽度截断、折行
//!
//!
//!     终端类型定义：
//!         pub type Term = Terminal<CrosstermBackend<Stdout>>;
//!
//!     初始化终端：
//!         enable_raw_mode()                   // 1. 启用原始模式
//!         execute!(stdout, EnterAlternateScreen)  // 2. 进入备用屏幕
//!         Terminal::new(backend)              // 3. 创建终端对象
//!
//!     恢复终端：
//!         disable_raw_mode()                  // 1. 禁用原始模式
//!         LeaveAlternateScreen                // 2. 离开备用屏幕
//!         show_cursor()                       // 3. 显示光标
//!
//!         注意：无论 app::run 成功与否，都必须恢复终端，再返回结果。
//!
//!
//!     日志：
//!         界面占用 stdout，所以日志写入 `<data_local_dir>/bangumi-tui/bangumi-tui.log`。
//!         级别来自配置 `log_level`，可被 `RUST_LOG` 覆盖。
//!

mod logging;
mod terminal;
mod text;

pub use logging::{init_logging, log_file_path};
pub use terminal::{init_terminal, restore_terminal, Term};
pub use text::{truncate_to_width, wrap_to_width};
