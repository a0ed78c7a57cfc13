use herald_core::press::{PressRelease, PressReleaseDraft};
use herald_core::types::display_date;

use crate::cli::{CreatePressArgs, DeleteArgs, PressCommand, ToggleArgs};
use crate::commands::{attachment_failed, print_rows, read_attachment, Console};
use crate::controller::{DeleteOutcome, FormController, ListController, OperationError};
use crate::screen::Screen;

pub async fn run(console: &Console, command: PressCommand) -> Result<(), OperationError> {
    match command {
        PressCommand::List(args) => list(console, &args.search).await,
        PressCommand::Create(args) => create(console, args).await,
        PressCommand::Delete(args) => delete(console, args).await,
        PressCommand::Toggle(args) => toggle(console, args).await,
    }
}

async fn list(console: &Console, query: &str) -> Result<(), OperationError> {
    let mut screen = ListController::new(console.client().press(), console.notifier());
    screen.load().await?;
    screen.set_search_query(query);

    let rows: Vec<String> = screen.filtered().into_iter().map(render_release).collect();
    print_rows(&rows, "No press releases found");
    Ok(())
}

async fn create(console: &Console, args: CreatePressArgs) -> Result<(), OperationError> {
    let failed = PressRelease::MESSAGES.create_failed;

    let content = match (&args.content, &args.content_file) {
        (_, Some(path)) => match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Cannot read content file");
                console.notifier().error(failed);
                return Err(OperationError::new(failed, e));
            }
        },
        (Some(content), None) => content.clone(),
        (None, None) => String::new(),
    };

    let mut draft = PressReleaseDraft::new();
    draft.title = args.title;
    draft.date = Some(args.date);
    draft.content = content;
    draft.source = args.source;
    draft.author = args.author;
    draft.link = args.link;
    draft.is_active = !args.inactive;
    for tag in &args.tags {
        draft.tags.add(tag);
    }
    if let Some(path) = &args.thumbnail {
        let thumbnail = read_attachment(console.previews(), path)
            .await
            .map_err(|e| attachment_failed(console.notifier().as_ref(), failed, e))?;
        draft.set_thumbnail(thumbnail);
    }

    let mut form = FormController::new(console.client().press(), console.notifier(), draft);
    if let Some(release) = form.submit().await? {
        println!("{}", render_release(&release));
    }
    Ok(())
}

async fn delete(console: &Console, args: DeleteArgs) -> Result<(), OperationError> {
    let mut screen = ListController::new(console.client().press(), console.notifier());
    screen.load().await?;
    let confirm = console.confirm(args.yes);
    if screen.delete(&args.id, confirm.as_ref()).await? == DeleteOutcome::Cancelled {
        println!("Cancelled");
    }
    Ok(())
}

async fn toggle(console: &Console, args: ToggleArgs) -> Result<(), OperationError> {
    let mut screen = ListController::new(console.client().press(), console.notifier());
    screen.load().await?;
    screen.toggle_active(&args.id, args.active).await?;
    if let Some(release) = screen.find(&args.id) {
        println!("{}", render_release(release));
    }
    Ok(())
}

fn render_release(release: &PressRelease) -> String {
    let status = if release.is_active { "active" } else { "inactive" };
    let mut line = format!(
        "{}  {}  {}  {}  ({status})",
        release.id,
        release.title,
        release.source,
        display_date(&release.date),
    );
    if !release.tags.is_empty() {
        line.push_str(&format!("  #{}", release.tags.join(" #")));
    }
    line
}
