// note: this example assumes you've analyzed the previous one

use ferrule::application::Application;
use ferrule::config::ApplicationConfig;
use ferrule::runner::{ApplicationRunner, ErrorPtr};
use ferrule_di::resolver::ServicePtr;
use ferrule_di::{provides, Service};

// the application config is provided as a service, so it can be injected anywhere
#[derive(Service)]
struct ConfigPrinterRunner {
    #[inject]
    config: Option<ServicePtr<ApplicationConfig>>,
}

#[provides]
impl ApplicationRunner for ConfigPrinterRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        if let Some(config) = &self.config {
            println!("Using built-in logger: {}", config.install_tracing_logger);
        }

        Ok(())
    }
}

fn main() {
    // start with a config from the environment and override what's needed; by default, it uses
    // environment variables and a configuration file (see module documentation)
    let mut config = ApplicationConfig::from_environment().expect("unable to load config");
    config.install_tracing_logger = false;

    let application = Application::from_config(&config).expect("unable to create application");
    application
        .injector()
        .provide(ConfigPrinterRunner { config: None })
        .expect("unable to register runner");

    // prints "Using built-in logger: false"
    application.run().expect("error running application");
}
