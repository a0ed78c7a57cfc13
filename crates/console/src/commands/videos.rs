use herald_core::types::display_date;
use herald_core::video::{Video, VideoDraft};

use crate::cli::{CreateVideoArgs, VideosCommand};
use crate::commands::{print_rows, Console};
use crate::controller::{FormController, ListController, OperationError};

pub async fn run(console: &Console, command: VideosCommand) -> Result<(), OperationError> {
    match command {
        VideosCommand::List(args) => list(console, &args.search).await,
        VideosCommand::Create(args) => create(console, args).await,
    }
}

async fn list(console: &Console, query: &str) -> Result<(), OperationError> {
    let mut screen = ListController::new(console.client().videos(), console.notifier());
    screen.load().await?;
    screen.set_search_query(query);

    let rows: Vec<String> = screen.filtered().into_iter().map(render_video).collect();
    print_rows(&rows, "No videos found");
    Ok(())
}

async fn create(console: &Console, args: CreateVideoArgs) -> Result<(), OperationError> {
    let draft = VideoDraft {
        title: args.title,
        thumbnail: args.thumbnail,
        video_link: args.link,
        publish_date: Some(args.publish_date),
        category: Some(args.category),
    };

    let mut form = FormController::new(console.client().videos(), console.notifier(), draft);
    if let Some(video) = form.submit().await? {
        println!("{}", render_video(&video));
    }
    Ok(())
}

fn render_video(video: &Video) -> String {
    format!(
        "{}  {}  [{}]  {}  {}",
        video.id,
        video.title,
        video.category,
        display_date(&video.publish_date),
        video.video_link,
    )
}
