use clap::Parser;
use rolestore::{Config, KeyedStore, Post, Role, User, UserData, logging};
use tracing::info;

/// Walk through the role-gated post operations against in-memory stores
#[derive(Debug, Parser)]
#[command(name = "rolestore", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log level, overrides the configuration file
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(level) = args.log_level {
        config.log.level = level;
    }

    // Initialize logging
    logging::init(&config.log)?;

    info!("Starting rolestore demo");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    run_demo(&config)
}

/// Render an operation outcome at the presentation boundary
fn report<T: std::fmt::Display, E: std::fmt::Display>(step: &str, result: &Result<T, E>) {
    match result {
        Ok(value) => info!("{}: {}", step, value),
        Err(e) => info!("{}: {}", step, e),
    }
}

fn run_demo(config: &Config) -> anyhow::Result<()> {
    let users = KeyedStore::<User>::new(&config.stores.user_kind);
    let posts = KeyedStore::<Post>::new(&config.stores.post_kind);

    let admin = User::new(
        1,
        "AdminUser",
        UserData {
            email: "admin@example.com".to_string(),
            role: Role::Admin,
        },
    )?;
    let normal = User::new(
        2,
        "NormalUser",
        UserData {
            email: "user@example.com".to_string(),
            role: Role::User,
        },
    )?;

    info!("Adding users to the database...");
    users.add(admin.clone());
    users.add(normal.clone());

    info!("Admin creating a post:");
    let created = admin.create_post(
        "Admin's First Post",
        "This is the content of the admin post.",
        &posts,
    )?;

    info!("Normal user trying to create a post (should fail):");
    let denied = normal.create_post(
        "User's First Post",
        "This is the content of the user post.",
        &posts,
    );
    report("Normal user create", &denied.map(|p| p.id));

    info!("Normal user reading all posts:");
    let all = normal.read_all_posts(&posts)?;
    info!("All posts: {}", serde_json::to_string(&all)?);

    info!("Admin updating a post:");
    report(
        "Admin update",
        &admin.update_post(
            created.id,
            "Updated Admin Post Title",
            "Updated content of the post.",
            &posts,
        ),
    );

    info!("Normal user attempting to update post (should be denied):");
    report(
        "Normal user update",
        &normal.update_post(
            created.id,
            "User's Attempt to Update Post",
            "This should fail.",
            &posts,
        ),
    );

    info!("Normal user attempting to delete post (should be denied):");
    report("Normal user delete", &normal.delete_post(created.id, &posts));

    info!("Admin deleting post:");
    report("Admin delete", &admin.delete_post(created.id, &posts));

    info!("Final list of posts after deletion by admin:");
    report("Final posts", &posts.get_all().map(|p| p.len()));

    info!("Admin deleting post again (should not be found):");
    report("Admin delete again", &admin.delete_post(created.id, &posts));

    info!("End of operations");
    Ok(())
}
