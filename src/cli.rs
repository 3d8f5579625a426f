use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "dogs")]
#[command(about = "Find adoptable dogs from the terminal", long_about = None)]
pub struct Args {
    #[arg(short = 'v', long = "verbose", help = "Print request diagnostics")]
    pub verbose: bool,

    #[arg(
        long = "api-url",
        help = "Custom API base URL (e.g., http://localhost:8080)"
    )]
    pub api_url: Option<String>,

    #[arg(long = "sort", help = "Initial sort order (breed|name|age:asc|desc)")]
    pub sort: Option<String>,

    #[arg(long = "name", help = "Name to log in with")]
    pub name: Option<String>,

    #[arg(long = "email", help = "Email to log in with")]
    pub email: Option<String>,

    #[arg(long = "status", help = "Check whether the saved session is still valid")]
    pub status: bool,

    #[arg(long = "breeds", help = "Print the breed list and exit")]
    pub list_breeds: bool,

    #[arg(long = "logout", help = "End the saved session")]
    pub logout: bool,

    #[arg(long = "config-init", help = "Write a default config file")]
    pub config_init: bool,
}
