mod application;
mod handlers;
mod state;


use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(err) = application::run().await {
        eprintln!("[api] startup failed: {err}");
        return Err(io::Error::other(err.to_string()));
    }

    Ok(())
}
