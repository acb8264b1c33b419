use brankas_app::{
    database::{self, Db},
    domain::boxes::{BoxesService, BoxesServiceError, PgBoxesService},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateBoxArgs {
    /// Box code shown to customers, e.g. `A-01`
    #[arg(long)]
    code: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateBoxArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgBoxesService::new(Db::new(pool));

    let created = service
        .create_box(None, &args.code)
        .await
        .map_err(|error| match error {
            BoxesServiceError::AlreadyExists => {
                format!("a box with code {} already exists", args.code.trim())
            }
            other => format!("failed to create box: {other}"),
        })?;

    println!("box_uuid: {}", created.uuid);
    println!("box_code: {}", created.box_code);
    println!("status: {}", created.status);

    Ok(())
}
