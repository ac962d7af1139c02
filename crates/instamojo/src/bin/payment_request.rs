use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use instamojo::{PaymentRequest, PaymentRequestClient, PAYMENT_REQUEST_ENDPOINT};

const ABOUT: &str = "Create a Payment Request on Instamojo.

Requires an API key and an auth token, both available from
https://www.instamojo.com/developers/";

const EXAMPLES: &str = "Examples:
  instamojo-payment-request \"Test payment link\" 12.34 <API_KEY> <AUTH_TOKEN>

  instamojo-payment-request \"Test payment link\" 12.34 <API_KEY> <AUTH_TOKEN> \\
      --buyer-name \"Aditya Sengupta\" --email aditya@instamojo.com \\
      --phone 7022622382 --send-email --send-sms \\
      --redirect-url http://www.example.com";

#[derive(Debug, Parser)]
#[command(name = "instamojo-payment-request", about = ABOUT, after_help = EXAMPLES)]
struct Args {
    /// Purpose of payment
    purpose: String,

    /// Amount to be paid (rounded to two decimal places)
    amount: Decimal,

    /// API key
    api_key: String,

    /// Auth token
    auth_token: String,

    /// Buyer's name
    #[arg(long)]
    buyer_name: Option<String>,

    /// Buyer's email address
    #[arg(long)]
    email: Option<String>,

    /// Buyer's phone number
    #[arg(long)]
    phone: Option<String>,

    /// Where to send the buyer after payment
    #[arg(long)]
    redirect_url: Option<String>,

    /// Webhook URL notified on payment
    #[arg(long)]
    webhook: Option<String>,

    /// Allow multiple payments on the same payment request URL
    #[arg(long)]
    allow_repeated_payments: bool,

    /// Send the payment request via email
    #[arg(long)]
    send_email: bool,

    /// Send the payment request via SMS
    #[arg(long)]
    send_sms: bool,

    /// API endpoint for creating payment requests
    #[arg(long, default_value = PAYMENT_REQUEST_ENDPOINT)]
    endpoint: String,
}

impl Args {
    fn payment_request(&self) -> PaymentRequest {
        PaymentRequest {
            purpose: self.purpose.clone(),
            amount: self.amount,
            buyer_name: self.buyer_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            redirect_url: self.redirect_url.clone(),
            webhook: self.webhook.clone(),
            allow_repeated_payments: self.allow_repeated_payments,
            send_email: self.send_email,
            send_sms: self.send_sms,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client =
        PaymentRequestClient::new(&args.api_key, &args.auth_token).with_endpoint(&args.endpoint);

    let response = match client.create(&args.payment_request()).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "payment request failed");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&response) {
        Ok(pretty) => println!("{pretty}"),
        Err(_) => println!("{response}"),
    }
}
