use roster_view::{RosterView, ViewConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000".to_string());

    let view = RosterView::new(ViewConfig::new(base_url)).unwrap();
    view.load().await;

    let page = view.page().await;
    println!("<select id=\"activity\">{}</select>", page.select_html());
    println!("<div id=\"activities-list\">{}</div>", page.activities_list);

    if let Some((activity, email)) = std::env::args().nth(2).zip(std::env::args().nth(3)) {
        view.submit_signup(&activity, &email).await;
        let page = view.page().await;
        println!("{} ({})", page.message.text, page.message.class_name());
        println!("<div id=\"activities-list\">{}</div>", page.activities_list);
    }
}
