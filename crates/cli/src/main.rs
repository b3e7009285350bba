use api_shared::PostRes;
use clap::{Args, Parser, Subcommand};
use posts_core::{
    config::posts_dir_from_env_value, CoreConfig, Post, PostFields, PostService, RawQueryParams,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "posts")]
#[command(about = "Manage a directory of Markdown blog posts")]
struct Cli {
    /// Posts directory
    #[arg(long, global = true, env = "POSTS_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    List {
        /// Case-insensitive title substring
        #[arg(long)]
        title: Option<String>,
        /// Required categories (comma-separated)
        #[arg(long)]
        categories: Option<String>,
        /// Required tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a post
    Create {
        /// Post title
        title: String,
        #[command(flatten)]
        body: BodyArgs,
    },
    /// Replace an existing post
    Update {
        /// Post id (file name)
        id: String,
        /// Post title
        title: String,
        #[command(flatten)]
        body: BodyArgs,
    },
    /// Delete a post
    Delete {
        /// Post id (file name)
        id: String,
    },
}

#[derive(Args)]
struct BodyArgs {
    /// Post body
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    content: Option<String>,
    /// Read the post body from a file
    #[arg(long)]
    file: Option<PathBuf>,
    /// Categories (comma-separated)
    #[arg(long)]
    categories: Option<String>,
    /// Tags (comma-separated)
    #[arg(long)]
    tags: Option<String>,
    /// Publication date, e.g. "2024-01-31 09:00:00"
    #[arg(long)]
    date: Option<String>,
}

impl BodyArgs {
    fn into_fields(self, title: String) -> std::io::Result<PostFields> {
        let content = match (self.content, self.file) {
            (Some(content), _) => content,
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => String::new(),
        };
        Ok(PostFields {
            title,
            content,
            date: self.date,
            categories: self.categories.as_deref().map(split_list),
            tags: self.tags.as_deref().map(split_list),
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_table(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts found.");
        return;
    }
    for post in posts {
        let date = if post.date.is_set() {
            post.date.to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{date:<19}  {}  {} [{}] #{}",
            post.id,
            post.title,
            post.categories.join(", "),
            post.tags.join(" #")
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("posts_core=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'posts --help' for commands");
        return Ok(());
    };

    let dir = posts_dir_from_env_value(cli.dir.map(|d| d.to_string_lossy().into_owned()));
    let service = PostService::with_config(&CoreConfig::new(dir)?);

    match command {
        Commands::List {
            title,
            categories,
            tags,
            json,
        } => {
            let params = RawQueryParams {
                title,
                categories,
                tags,
            };
            let posts = service.list(&params)?;
            if json {
                let body: Vec<PostRes> = posts.into_iter().map(PostRes::from).collect();
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_table(&posts);
            }
        }
        Commands::Create { title, body } => {
            let id = service.create(body.into_fields(title)?)?;
            println!("Created post: {id}");
        }
        Commands::Update { id, title, body } => {
            service.update(&id, body.into_fields(title)?)?;
            println!("Updated post: {id}");
        }
        Commands::Delete { id } => {
            service.delete(&id)?;
            println!("Deleted post: {id}");
        }
    }

    Ok(())
}
