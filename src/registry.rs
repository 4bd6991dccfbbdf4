use lazy_static::lazy_static;
use std::collections::HashMap;

/// Usage and help for one `resource.action` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub resource: &'static str,
    pub action: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
}

impl CommandSpec {
    const fn new(
        resource: &'static str,
        action: &'static str,
        usage: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            resource,
            action,
            usage,
            help,
        }
    }

    /// Canonical `resource.action` spelling, as the remote API expects it.
    pub fn name(&self) -> String {
        format!("{}.{}", self.resource, self.action)
    }
}

const HISTORY_USAGE: &str = "channel [latest] [oldest] [count]";
const SEARCH_USAGE: &str = "query [sort] [sort_dir] [highlight] [count] [page]";
const SEARCH_HELP: &str = "sort is score or timestamp, default is score, sort_dir is asc or desc, default is desc, pass 1 to enable highlight";

// Registry order is the order completion and `commands` list things in.
const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new("auth", "test", "", ""),
    CommandSpec::new("channels", "archive", "channel", ""),
    CommandSpec::new("channels", "create", "name", ""),
    CommandSpec::new("channels", "history", HISTORY_USAGE, ""),
    CommandSpec::new("channels", "info", "channel", ""),
    CommandSpec::new("channels", "invite", "channel user", ""),
    CommandSpec::new("channels", "join", "name", ""),
    CommandSpec::new("channels", "kick", "channel user", ""),
    CommandSpec::new("channels", "leave", "channel", ""),
    CommandSpec::new("channels", "list", "[exclude_archived]", ""),
    CommandSpec::new("channels", "mark", "channel ts", ""),
    CommandSpec::new("channels", "rename", "channel name", ""),
    CommandSpec::new("channels", "setPurpose", "channel purpose", ""),
    CommandSpec::new("channels", "setTopic", "channel topic", ""),
    CommandSpec::new("channels", "unarchive", "channel", ""),
    CommandSpec::new("groups", "archive", "channel", ""),
    CommandSpec::new("groups", "close", "channel", ""),
    CommandSpec::new("groups", "create", "name", ""),
    CommandSpec::new("groups", "createChild", "channel", ""),
    CommandSpec::new("groups", "history", HISTORY_USAGE, ""),
    CommandSpec::new("groups", "invite", "channel user", ""),
    CommandSpec::new("groups", "kick", "channel user", ""),
    CommandSpec::new("groups", "leave", "channel", ""),
    CommandSpec::new("groups", "list", "[exclude_archived]", ""),
    CommandSpec::new("groups", "mark", "channel ts", ""),
    CommandSpec::new("groups", "open", "channel", ""),
    CommandSpec::new("groups", "rename", "channel name", ""),
    CommandSpec::new("groups", "setPurpose", "channel purpose", ""),
    CommandSpec::new("groups", "setTopic", "channel topic", ""),
    CommandSpec::new("groups", "unarchive", "channel", ""),
    CommandSpec::new("files", "info", "file [count] [page]", ""),
    CommandSpec::new(
        "files",
        "list",
        "[user] [ts_from] [ts_to] [types] [count] [page]",
        "",
    ),
    CommandSpec::new(
        "files",
        "upload",
        "[file] [content] [filetype] [filename] [title] [initial_comment] [channels]",
        "file is a local path, its text is sent as content",
    ),
    CommandSpec::new("chat", "delete", "ts channel", ""),
    CommandSpec::new(
        "chat",
        "postMessage",
        "channel text [username] [parse] [link_names] [attachments] [unfurl_links] [unfurl_media] [icon_url] [icon_emoji]",
        "attachments is a json format string",
    ),
    CommandSpec::new("chat", "update", "ts channel text", ""),
    CommandSpec::new("emoji", "list", "", ""),
    CommandSpec::new("im", "close", "channel", ""),
    CommandSpec::new(
        "im",
        "history",
        HISTORY_USAGE,
        "latest is a timestamp, default is now, oldest default is 0",
    ),
    CommandSpec::new("im", "list", "", ""),
    CommandSpec::new("im", "mark", "channel ts", "ts is a timestamp"),
    CommandSpec::new("im", "open", "user", ""),
    CommandSpec::new("search", "all", SEARCH_USAGE, SEARCH_HELP),
    CommandSpec::new("search", "files", SEARCH_USAGE, SEARCH_HELP),
    CommandSpec::new("search", "messages", SEARCH_USAGE, SEARCH_HELP),
    CommandSpec::new(
        "stars",
        "list",
        "[user] [count] [page]",
        "default user is your token user, default count is 100 and page is 1",
    ),
    CommandSpec::new("users", "getPresence", "user", ""),
    CommandSpec::new("users", "info", "user", ""),
    CommandSpec::new("users", "list", "", ""),
    CommandSpec::new("users", "setActive", "", ""),
    CommandSpec::new("users", "setPresence", "presence", "presence is auto or away"),
];

lazy_static! {
    static ref REGISTRY: Registry = Registry::new(COMMANDS);
}

/// Read-only table of every command the shell knows about.
#[derive(Debug)]
pub struct Registry {
    specs: &'static [CommandSpec],
    names: Vec<String>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    fn new(specs: &'static [CommandSpec]) -> Self {
        let names: Vec<String> = specs.iter().map(CommandSpec::name).collect();
        let by_name = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_ascii_lowercase(), i))
            .collect();
        Self {
            specs,
            names,
            by_name,
        }
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> &'static Registry {
        &*REGISTRY
    }

    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.specs[i])
    }

    /// Command names starting with `prefix`, ignoring case, in registry order.
    pub fn all_matching_prefix(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_ascii_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_ascii_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }

    /// Usage line plus description, tab-indented for the `help` command.
    pub fn help_for(&self, name: &str) -> Option<String> {
        self.find(name).map(|spec| {
            format!(
                "\t{} {}\n\tDescription: {}",
                spec.name(),
                spec.usage,
                spec.help
            )
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.specs.iter()
    }
}
