#[actix_web::main]
async fn main() -> std::io::Result<()> {
    car_price_lib::run().await
}
