use clap::{ArgAction, ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rcopywriter
/// Turn a product photo into marketing copy and keep an editable history
#[derive(Parser)]
#[command(
    name = "rcopywriter",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate marketing copy from a product photo and manage the post history (CSV)",
    long_about = None
)]
pub struct Cli {
    /// Override history file path (useful for tests or a custom file)
    #[arg(global = true, long = "history", value_name = "FILE")]
    pub history: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and an empty history file
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Generate a new post from a product photo and save it to the history
    Generate {
        /// Product photo (.jpg, .jpeg or .png)
        #[arg(long = "image", value_name = "FILE")]
        image: String,

        /// Product name (default from config: 未命名商品)
        #[arg(long = "name")]
        name: Option<String>,

        /// Tone preset: number 1-4, label, or alias (hype, bestie, pro, funny)
        #[arg(long = "style")]
        style: Option<String>,

        /// API key (overrides OPENAI_API_KEY and the config file)
        #[arg(long = "api-key", value_name = "KEY")]
        api_key: Option<String>,

        /// Model name
        #[arg(long = "model")]
        model: Option<String>,

        /// Base URL of an OpenAI-compatible API
        #[arg(long = "api-base", value_name = "URL")]
        api_base: Option<String>,
    },

    /// List saved posts, most recent first
    List {
        #[arg(long, short = 'n', help = "Show only the N most recent posts")]
        limit: Option<usize>,
    },

    /// Show one saved post
    Show {
        /// Position in `list` (1 = most recent), timestamp, or history label
        selection: String,
    },

    /// Overwrite the content of a saved post
    #[command(group(
        ArgGroup::new("source")
            .required(true)
            .args(["content", "file", "editor"])
    ))]
    Edit {
        /// Position in `list` (1 = most recent), timestamp, or history label
        selection: String,

        #[arg(long = "content", help = "New content text")]
        content: Option<String>,

        #[arg(long = "file", value_name = "FILE", help = "Read the new content from a file")]
        file: Option<String>,

        #[arg(long = "editor", help = "Edit the current content in $EDITOR")]
        editor: bool,
    },

    /// Delete a saved post
    Del {
        /// Position in `list` (1 = most recent), timestamp, or history label
        selection: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List the available tone presets
    Styles,

    /// Interactive session: pick image, name and style, generate, load, edit, save
    Studio {
        /// API key (overrides OPENAI_API_KEY and the config file)
        #[arg(long = "api-key", value_name = "KEY")]
        api_key: Option<String>,

        /// Base URL of an OpenAI-compatible API
        #[arg(long = "api-base", value_name = "URL")]
        api_base: Option<String>,
    },
}
