use brankas_app::{
    database::{self, Db},
    domain::boxes::{BoxesService, PgBoxesService},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ListBoxesArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListBoxesArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let boxes = PgBoxesService::new(Db::new(pool))
        .list_boxes()
        .await
        .map_err(|error| format!("failed to list boxes: {error}"))?;

    if boxes.is_empty() {
        println!("no boxes found");
        return Ok(());
    }

    for deposit_box in boxes {
        println!("{}\t{}\t{}", deposit_box.box_code, deposit_box.status, deposit_box.uuid);
    }

    Ok(())
}
