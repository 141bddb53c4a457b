//!
//! src/cli/mod.rs
//! 命令行入口与分发
//!
//! 不带子命令时进入终端界面；其余子命令一次性执行，结果打印到 stdout：
//!
//!     bangumi-tui [ui]
//!     bangumi-tui list [-c STATUS] [-s TYPE] [-n LIMIT]
//!     bangumi-tui calendar | cal
//!     bangumi-tui search [-k KEYWORD] [-s SORT] [-c TYPE,..] [-t TAG].. [-r RATING]..
//!     bangumi-tui subject | sub  info|status|edit <ID>
//!     bangumi-tui auth status|logout
//!
//! 所有子命令共用同一份配置与文件日志。
//!

mod commands;

use anyhow::Result;
use bangumi_core::types::{CollectionStatus, SearchSort, SubjectType};
use clap::Parser;

use crate::backend::{ConfigService, CoreService, LocalConfigService};
use crate::util::init_logging;

#[derive(Parser, Debug)]
#[command(name = "bangumi-tui")]
#[command(version)]
#[command(about = "Terminal client for the bangumi media tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
enum Commands {
    /// Open the terminal interface (default)
    Ui,

    /// Print one page of your collection
    List {
        /// Collection status: watching, wish, done, stashed, dropped
        #[arg(short = 'c', long = "collection", default_value = "watching", value_parser = parse_status)]
        status: CollectionStatus,

        /// Subject type: book, anime, music, game, real (default: all)
        #[arg(short = 's', long = "subject-type", value_parser = parse_subject_type)]
        subject_type: Option<SubjectType>,

        /// Number of entries to print
        #[arg(short = 'n', long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: u32,
    },

    /// Print this week's airing calendar
    #[command(visible_alias = "cal")]
    Calendar,

    /// Search subjects
    Search(SearchArgs),

    /// Show or edit a single subject
    #[command(visible_alias = "sub")]
    Subject {
        #[command(subcommand)]
        command: SubjectCommands,
    },

    /// Inspect or remove the stored credential
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

/// 搜索参数
#[derive(clap::Args, Debug, Default, PartialEq)]
pub(crate) struct SearchArgs {
    /// Keyword to search for
    #[arg(short, long)]
    keyword: Option<String>,

    /// Sort order: match, heat, rank, score
    #[arg(short, long, default_value = "match", value_parser = parse_sort)]
    sort: SearchSort,

    /// Subject types, comma separated
    #[arg(short = 'c', long = "type", value_delimiter = ',', value_parser = parse_subject_type)]
    types: Vec<SubjectType>,

    /// Meta tag (repeatable)
    #[arg(short = 'T', long = "meta-tag")]
    meta_tags: Vec<String>,

    /// Tag, prefix with '-' to exclude (repeatable)
    #[arg(short = 't', long = "tag", allow_hyphen_values = true)]
    tags: Vec<String>,

    /// Air date range, e.g. ">=2020-07-01" (repeatable)
    #[arg(short = 'd', long = "air-date")]
    air_dates: Vec<String>,

    /// Rating range, e.g. ">=7.5" (repeatable)
    #[arg(short = 'r', long = "rating", value_parser = parse_range)]
    ratings: Vec<String>,

    /// Rank range, e.g. "<=100" (repeatable)
    #[arg(short = 'R', long = "rank", value_parser = parse_range)]
    ranks: Vec<String>,

    /// Include NSFW subjects
    #[arg(short = 'n', long)]
    nsfw: bool,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
enum SubjectCommands {
    /// Print the subject's names and summary
    Info { id: u32 },

    /// Print your collection state and episode progress
    Status { id: u32 },

    /// Update your collection entry
    Edit(EditArgs),
}

/// 条目编辑参数；未给出的字段保持原值
#[derive(clap::Args, Debug, Default, PartialEq)]
pub(crate) struct EditArgs {
    id: u32,

    /// Mark episodes up to N as watched
    #[arg(short, long, value_name = "N")]
    watch: Option<u32>,

    /// Mark the next episode as watched
    #[arg(long, conflicts_with = "watch")]
    next: bool,

    /// Collection status: watching, wish, done, stashed, dropped
    #[arg(long, value_parser = parse_status)]
    status: Option<CollectionStatus>,

    /// Rating 0-10 (0 clears)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    rate: Option<u8>,

    /// Space separated tags, replaces the current ones
    #[arg(long)]
    tags: Option<String>,

    #[arg(long)]
    comment: Option<String>,

    /// Hide the entry from other users
    #[arg(long)]
    private: Option<bool>,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
enum AuthCommands {
    /// Check that the stored credential works
    Status,
    /// Delete the stored credential
    Logout,
}

// ========== 参数解析 ==========

/// 收藏状态：页面名，另接受 `watch` / `onhold` 两个简写
fn parse_status(value: &str) -> Result<CollectionStatus, String> {
    let name = value.trim().to_ascii_lowercase();
    let name = match name.as_str() {
        "watch" => "watching",
        "onhold" | "on-hold" => "stashed",
        other => other,
    };
    CollectionStatus::from_page_name(name).ok_or_else(|| {
        format!("unknown collection status '{value}', expected one of: watching, wish, done, stashed, dropped")
    })
}

fn parse_subject_type(value: &str) -> Result<SubjectType, String> {
    SubjectType::from_name(value).ok_or_else(|| {
        format!("unknown subject type '{value}', expected one of: book, anime, music, game, real")
    })
}

fn parse_sort(value: &str) -> Result<SearchSort, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "match" => Ok(SearchSort::Match),
        "heat" => Ok(SearchSort::Heat),
        "rank" => Ok(SearchSort::Rank),
        "score" => Ok(SearchSort::Score),
        _ => Err(format!(
            "unknown sort '{value}', expected one of: match, heat, rank, score"
        )),
    }
}

/// 数值区间：比较符后跟数字，例如 `>=7`、`< 8.5`、`=100`
fn parse_range(value: &str) -> Result<String, String> {
    let invalid = || format!("invalid range '{value}', expected e.g. '>=7' or '<8.5'");
    let rest = [">=", "<=", ">", "<", "="]
        .iter()
        .find_map(|op| value.strip_prefix(op))
        .ok_or_else(invalid)?;
    let number = rest.trim_start_matches(' ');
    let (int, frac) = match number.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (number, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if digits(int) && frac.iter().all(|f| digits(f)) {
        Ok(value.to_string())
    } else {
        Err(invalid())
    }
}

// ========== 分发 ==========

/// 解析命令行并执行
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_service = LocalConfigService::new();
    let config = config_service.load()?;
    let log_path = init_logging(&config.log_level)?;
    log::info!("Logging to {}", log_path.display());

    let command = cli.command.unwrap_or(Commands::Ui);
    log::debug!("Running {command:?}");

    // 终端界面之外的子命令各自创建核心服务
    let backend = || CoreService::new(&config);
    match command {
        Commands::Ui => commands::ui::run(&config_service, &config),
        Commands::List {
            status,
            subject_type,
            limit,
        } => commands::list::run(&backend()?, status, subject_type, limit),
        Commands::Calendar => commands::calendar::run(&backend()?),
        Commands::Search(args) => commands::search::run(&backend()?, &args),
        Commands::Subject { command } => match command {
            SubjectCommands::Info { id } => commands::subject::info(&backend()?, id),
            SubjectCommands::Status { id } => commands::subject::status(&backend()?, id),
            SubjectCommands::Edit(args) => commands::subject::edit(&backend()?, &args),
        },
        Commands::Auth { command } => match command {
            AuthCommands::Status => commands::auth::status(&backend()?),
            AuthCommands::Logout => commands::auth::logout(&backend()?),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Commands> {
        let mut argv = vec!["bangumi-tui"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_no_subcommand_opens_ui() {
        assert_eq!(parse(&[]), None);
        assert_eq!(parse(&["ui"]), Some(Commands::Ui));
    }

    #[test]
    fn test_list_defaults_and_aliases() {
        assert_eq!(
            parse(&["list"]),
            Some(Commands::List {
                status: CollectionStatus::Watching,
                subject_type: None,
                limit: 30,
            })
        );
        assert_eq!(
            parse(&["list", "-c", "onhold", "-s", "anime", "-n", "5"]),
            Some(Commands::List {
                status: CollectionStatus::OnHold,
                subject_type: Some(SubjectType::Anime),
                limit: 5,
            })
        );
        assert!(Cli::try_parse_from(["bangumi-tui", "list", "-c", "all"]).is_err());
        assert!(Cli::try_parse_from(["bangumi-tui", "list", "-n", "0"]).is_err());
    }

    #[test]
    fn test_short_aliases() {
        assert_eq!(parse(&["cal"]), Some(Commands::Calendar));
        assert_eq!(
            parse(&["sub", "info", "42"]),
            Some(Commands::Subject {
                command: SubjectCommands::Info { id: 42 }
            })
        );
        assert_eq!(
            parse(&["auth", "logout"]),
            Some(Commands::Auth {
                command: AuthCommands::Logout
            })
        );
    }

    #[test]
    fn test_search_args() {
        let Some(Commands::Search(args)) = parse(&[
            "search", "-k", "frieren", "-s", "rank", "-c", "anime,book", "-t", "-Netflix",
            "-r", ">=7.5", "-R", "<= 100", "-n",
        ]) else {
            panic!("expected search");
        };
        assert_eq!(args.keyword.as_deref(), Some("frieren"));
        assert_eq!(args.sort, SearchSort::Rank);
        assert_eq!(args.types, vec![SubjectType::Anime, SubjectType::Book]);
        assert_eq!(args.tags, vec!["-Netflix"]);
        assert_eq!(args.ratings, vec![">=7.5"]);
        assert_eq!(args.ranks, vec!["<= 100"]);
        assert!(args.nsfw);
    }

    #[test]
    fn test_range_validation() {
        for ok in [">=7", "<8.5", "= 100", ">0.1"] {
            assert!(parse_range(ok).is_ok(), "{ok}");
        }
        for bad in ["7", ">=", ">=x", "=>7", ">=7.", ">=.5", "<=7.5.1"] {
            assert!(parse_range(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_edit_args() {
        let Some(Commands::Subject {
            command: SubjectCommands::Edit(args),
        }) = parse(&["subject", "edit", "7", "-w", "3", "--status", "done", "--rate", "8"])
        else {
            panic!("expected edit");
        };
        assert_eq!(args.id, 7);
        assert_eq!(args.watch, Some(3));
        assert_eq!(args.status, Some(CollectionStatus::Done));
        assert_eq!(args.rate, Some(8));

        assert!(Cli::try_parse_from(["bangumi-tui", "sub", "edit", "7", "-w", "3", "--next"]).is_err());
        assert!(Cli::try_parse_from(["bangumi-tui", "sub", "edit", "7", "--rate", "11"]).is_err());
    }
}
