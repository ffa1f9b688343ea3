#[tokio::main]
async fn main() {
    if let Err(err) = outdoors_activities::run().await {
        eprintln!("outdoors-activities failed: {err}");
        std::process::exit(1);
    }
}
