use ferrule_di::error::ErrorPtr;
use ferrule_di::injector::{Injector, InjectorConfig};
use ferrule_di::resolver::ServicePtr;
use ferrule_di::{capability, provides, Service};

#[capability]
trait Storage {
    fn describe(&self) -> String;
}

#[derive(Service, Default)]
struct MemoryStorage;

#[provides]
impl Storage for MemoryStorage {
    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// services can have initializers and shutdown hooks
#[derive(Service, Default)]
#[service(init = "Self::open", shutdown = "Self::close")]
struct Repository {
    #[inject]
    storage: Option<ServicePtr<dyn Storage + Send + Sync>>,
    description: String,
}

impl Repository {
    // called after dependencies are injected, but before the service is registered
    fn open(&mut self) -> Result<(), ErrorPtr> {
        if let Some(storage) = &self.storage {
            self.description = format!("repository backed by {}", storage.describe());
        }

        println!("Opened {}.", self.description);
        Ok(())
    }

    // called when the container shuts down
    fn close(&self) {
        println!("Closed {}.", self.description);
    }
}

// initializers can also request dependencies as parameters
#[derive(Service, Default)]
#[service(init = "Self::start")]
struct Reporter;

impl Reporter {
    fn start(&mut self, repository: ServicePtr<Repository>) -> Result<(), ErrorPtr> {
        println!("Reporting from {}.", repository.description);
        Ok(())
    }
}

fn main() {
    // debug mode emits tracing events for every container decision
    let injector = Injector::with_config(&InjectorConfig { debug: true });

    injector
        .provide(MemoryStorage)
        .expect("error registering MemoryStorage");
    injector
        .provide(Repository::default())
        .expect("error registering Repository");
    injector
        .provide(Reporter)
        .expect("error registering Reporter");

    // prints "Closed repository backed by memory."
    injector.shutdown();
}
