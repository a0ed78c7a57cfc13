use std::path::Path;
use std::sync::Arc;

use herald_client::ResourceApi;
use herald_core::attachment::PreviewRegistry;
use herald_core::event::{PhotoEvent, PhotoEventDraft};
use herald_core::types::display_date;
use herald_core::CoreError;

use crate::cli::{CreateEventArgs, DeleteArgs, EventsCommand, ImageArg};
use crate::commands::{attachment_failed, print_rows, read_attachment, Console};
use crate::controller::{download_qr, DeleteOutcome, FormController, ListController, OperationError};
use crate::notify::Notifier;
use crate::screen::Screen;

pub async fn run(console: &Console, command: EventsCommand) -> Result<(), OperationError> {
    match command {
        EventsCommand::List(args) => list(console, &args.search).await,
        EventsCommand::Create(args) => create(console, args).await,
        EventsCommand::Delete(args) => delete(console, args).await,
        EventsCommand::Qr { id, out } => qr(console, &id, &out).await,
    }
}

async fn list(console: &Console, query: &str) -> Result<(), OperationError> {
    let mut screen = ListController::new(console.client().events(), console.notifier());
    screen.load().await?;
    screen.set_search_query(query);

    let rows: Vec<String> = screen.filtered().into_iter().map(render_event).collect();
    print_rows(&rows, "No events found");
    Ok(())
}

async fn create(console: &Console, args: CreateEventArgs) -> Result<(), OperationError> {
    let created = create_event(
        console.client().events(),
        console.notifier(),
        console.previews(),
        args,
    )
    .await?;

    if let Some(event) = created {
        println!("{}", render_event(&event));
        if let Some(permalink) = &event.permalink {
            println!("  permalink: {permalink}");
        }
        if let Some(qr) = &event.qr_code {
            println!("  qr code:   {qr}");
        }
    }
    Ok(())
}

/// Load every picked photo, then submit the event. A photo that cannot be
/// loaded fails the whole submission before anything is sent.
pub async fn create_event<A: ResourceApi<PhotoEvent>>(
    api: A,
    notifier: Arc<dyn Notifier>,
    previews: &PreviewRegistry,
    args: CreateEventArgs,
) -> Result<Option<PhotoEvent>, OperationError> {
    let draft = build_draft(previews, args).await.map_err(|e| {
        attachment_failed(notifier.as_ref(), PhotoEvent::MESSAGES.create_failed, e)
    })?;

    let mut form = FormController::new(api, notifier, draft);
    form.submit().await
}

async fn delete(console: &Console, args: DeleteArgs) -> Result<(), OperationError> {
    let mut screen = ListController::new(console.client().events(), console.notifier());
    screen.load().await?;
    let confirm = console.confirm(args.yes);
    if screen.delete(&args.id, confirm.as_ref()).await? == DeleteOutcome::Cancelled {
        println!("Cancelled");
    }
    Ok(())
}

async fn qr(console: &Console, id: &str, out: &Path) -> Result<(), OperationError> {
    let notifier = console.notifier();
    let event = match console.client().events().get(id).await {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(event = id, error = %e, "Failed to fetch event");
            notifier.error(crate::controller::QR_FAILED);
            return Err(OperationError::new(crate::controller::QR_FAILED, e));
        }
    };

    let path = download_qr(console.client(), notifier.as_ref(), &event, out).await?;
    println!("{}", path.display());
    Ok(())
}

pub(crate) async fn build_draft(
    previews: &PreviewRegistry,
    args: CreateEventArgs,
) -> Result<PhotoEventDraft, CoreError> {
    let mut draft = PhotoEventDraft::new();
    draft.title = args.title;
    draft.event_type = Some(args.event_type);
    draft.date = Some(args.date);

    for ImageArg { path, caption } in args.images {
        let attachment = read_attachment(previews, &path).await?;
        draft.images.push(attachment);
        let index = draft.images.len() - 1;
        draft.images.set_caption(index, caption)?;
    }
    Ok(draft)
}

fn render_event(event: &PhotoEvent) -> String {
    format!(
        "{id}  {title}  [{kind}]  {date}  {count} photos",
        id = event.id,
        title = event.title,
        kind = event.event_type,
        date = display_date(&event.date),
        count = event.images.len(),
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use herald_core::event::EventType;

    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn args(images: Vec<ImageArg>) -> CreateEventArgs {
        CreateEventArgs {
            title: "Spring Gala".into(),
            event_type: EventType::Corporate,
            date: NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
            images,
        }
    }

    #[tokio::test]
    async fn unreadable_photo_fails_whole_draft() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.png");
        std::fs::write(&good, PNG_HEADER).unwrap();
        let registry = PreviewRegistry::new();

        let result = build_draft(
            &registry,
            args(vec![
                ImageArg { path: good.clone(), caption: "One".into() },
                ImageArg { path: dir.path().join("missing.png"), caption: String::new() },
                ImageArg { path: good, caption: "Three".into() },
            ]),
        )
        .await;

        assert_matches!(result, Err(CoreError::Attachment(_)));
        assert_eq!(registry.live(), 0);
    }

    #[tokio::test]
    async fn captions_follow_their_photos() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, PNG_HEADER).unwrap();
        let registry = PreviewRegistry::new();

        let draft = build_draft(
            &registry,
            args(vec![
                ImageArg { path: path.clone(), caption: "Stage".into() },
                ImageArg { path: PathBuf::from(&path), caption: String::new() },
            ]),
        )
        .await
        .unwrap();

        let captions: Vec<&str> = draft.images.iter().map(|i| i.caption.as_str()).collect();
        assert_eq!(captions, ["Stage", ""]);
        assert_eq!(registry.live(), 2);
    }

    #[test]
    fn renders_display_date_and_photo_count() {
        let event: PhotoEvent = serde_json::from_value(serde_json::json!({
            "_id": "e1",
            "title": "Spring Gala",
            "date": "2024-04-12T00:00:00.000Z",
            "eventType": "Corporate",
            "images": [{ "url": "a" }, { "url": "b" }]
        }))
        .unwrap();
        assert_eq!(
            render_event(&event),
            "e1  Spring Gala  [Corporate]  Apr 12, 2024  2 photos"
        );
    }
}
