use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use instamojo::{InstamojoError, Intent, LinkBuilder, Offer};

const ABOUT: &str = "Create pre-filled Instamojo offer URLs, with optional signing.

Any of the buyer's name, email address and phone number can be pre-filled,
along with custom fields (Field_*) created on the offer.

Fields listed with --hidden are rendered with type=\"hidden\" on the purchase
form. Fields listed with --readonly cannot be edited on the form; a determined
buyer can still edit the query string, so pass --sign to make the read-only
values tamper-evident (signing must be enabled for the offer).";

const EXAMPLES: &str = "Examples:
  instamojo-link www.instamojo.com/demo/demo-offer/ --name \"Aditya Sengupta\"

  instamojo-link www.instamojo.com/demo/demo-offer/ --name \"Aditya Sengupta\" \\
      --email aditya@instamojo.com --phone 02240044008 --readonly name,email

  instamojo-link --username demo --slug demo-offer --name \"Aditya Sengupta\" \\
      --readonly name --sign --salt <SALT> --intent buy \\
      --custom Field_48905=Instamojo,Field_53198=26";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IntentArg {
    Buy,
}

impl From<IntentArg> for Intent {
    fn from(arg: IntentArg) -> Self {
        match arg {
            IntentArg::Buy => Intent::Buy,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "instamojo-link", about = ABOUT, after_help = EXAMPLES)]
struct Args {
    /// Instamojo offer URL without parameters
    #[arg(required_unless_present_all = ["username", "slug"])]
    url: Option<String>,

    /// Your Instamojo username (used with --slug instead of a URL)
    #[arg(long, requires = "slug")]
    username: Option<String>,

    /// Your Instamojo offer slug
    #[arg(long, requires = "username")]
    slug: Option<String>,

    /// Name of the buyer
    #[arg(long)]
    name: Option<String>,

    /// Email address of the buyer
    #[arg(long)]
    email: Option<String>,

    /// Phone number of the buyer
    #[arg(long)]
    phone: Option<String>,

    /// Amount for this transaction
    #[arg(long)]
    amount: Option<Decimal>,

    /// Custom fields as key=value pairs, comma separated
    #[arg(long)]
    custom: Option<String>,

    /// Fields that should be readonly, comma separated
    #[arg(long, value_delimiter = ',')]
    readonly: Vec<String>,

    /// Fields that should be hidden, comma separated
    #[arg(long, value_delimiter = ',')]
    hidden: Vec<String>,

    /// Sign this URL
    #[arg(long)]
    sign: bool,

    /// Salt to sign the URL with
    #[arg(long, env = "instamojo_salt", hide_env_values = true)]
    salt: Option<String>,

    /// Purchase intent
    #[arg(long, value_enum)]
    intent: Option<IntentArg>,

    /// Endpoint the URL is rooted at
    #[arg(long)]
    endpoint: Option<String>,
}

fn parse_custom_fields(raw: &str) -> Result<Vec<(String, String)>, InstamojoError> {
    raw.split(',')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| {
                    InstamojoError::Input(format!("custom field must be key=value, got {pair:?}"))
                })
        })
        .collect()
}

fn run(args: Args) -> Result<String, InstamojoError> {
    let offer = match (args.url, args.username, args.slug) {
        (Some(url), _, _) => Offer::url(url),
        (None, Some(username), Some(slug)) => Offer::slug(username, slug),
        _ => {
            return Err(InstamojoError::Input(
                "either a URL or --username and --slug are required".to_string(),
            ))
        }
    };

    let mut builder = LinkBuilder::new(offer);
    if let Some(endpoint) = args.endpoint {
        builder = builder.endpoint(endpoint);
    }
    if let Some(name) = args.name {
        builder = builder.name(name);
    }
    if let Some(email) = args.email {
        builder = builder.email(email);
    }
    if let Some(phone) = args.phone {
        builder = builder.phone(phone);
    }
    if let Some(amount) = args.amount {
        builder = builder.amount(amount);
    }
    if let Some(intent) = args.intent {
        builder = builder.intent(intent.into());
    }
    if let Some(custom) = args.custom.as_deref() {
        for (key, value) in parse_custom_fields(custom)? {
            builder = builder.custom_field(key, value);
        }
    }
    for field in args.readonly.into_iter().filter(|f| !f.is_empty()) {
        builder = builder.readonly(field);
    }
    for field in args.hidden.into_iter().filter(|f| !f.is_empty()) {
        builder = builder.hidden(field);
    }
    if args.sign {
        let salt = args.salt.ok_or_else(|| {
            InstamojoError::Configuration(
                "can't sign URL without salt (use --salt or instamojo_salt)".to_string(),
            )
        })?;
        builder = builder.sign_with(salt);
    }

    Ok(builder.build()?.into_string())
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Args::parse()) {
        Ok(link) => println!("{link}"),
        Err(e) => {
            tracing::error!(error = %e, "failed to build link");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_custom_fields() {
        let fields = parse_custom_fields("Field_48905=Instamojo,Field_53198=26").unwrap();
        assert_eq!(
            fields,
            vec![
                ("Field_48905".to_string(), "Instamojo".to_string()),
                ("Field_53198".to_string(), "26".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_custom_fields_rejects_missing_equals() {
        let err = parse_custom_fields("Field_1").unwrap_err();
        assert!(matches!(err, InstamojoError::Input(_)));
    }

    #[test]
    fn test_run_with_slug_args() {
        let args = Args::parse_from([
            "instamojo-link",
            "--username",
            "demo",
            "--slug",
            "demo-offer",
            "--name",
            "A S",
        ]);
        assert_eq!(
            run(args).unwrap(),
            "https://www.instamojo.com/demo/demo-offer/?data_name=A+S"
        );
    }

    #[test]
    fn test_run_sign_uses_salt_flag() {
        let args = Args::parse_from([
            "instamojo-link",
            "www.instamojo.com/demo/demo-offer/",
            "--name",
            "Aditya Sengupta",
            "--readonly",
            "name",
            "--sign",
            "--salt",
            "s3cr3t",
        ]);
        let link = run(args).unwrap();
        assert!(link.contains("data_sign=2e990fc5f3a86e386a7e59071398637d57bdcfca"));
        assert!(link.contains("data_readonly=data_name"));
    }

    // Both cases live in one test: they share the process environment.
    #[test]
    fn test_sign_salt_from_env_and_missing_salt() {
        let sign_args = || {
            Args::parse_from([
                "instamojo-link",
                "www.instamojo.com/demo/demo-offer/",
                "--name",
                "Aditya Sengupta",
                "--readonly",
                "name",
                "--sign",
            ])
        };

        std::env::set_var("instamojo_salt", "s3cr3t");
        let link = run(sign_args()).unwrap();
        assert_eq!(
            link,
            "https://www.instamojo.com/demo/demo-offer/?data_name=Aditya+Sengupta\
             &data_readonly=data_name&data_sign=2e990fc5f3a86e386a7e59071398637d57bdcfca"
        );

        std::env::remove_var("instamojo_salt");
        let err = run(sign_args()).unwrap_err();
        assert!(matches!(err, InstamojoError::Configuration(_)));
    }
}
