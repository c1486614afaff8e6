use ferrule_di::injector::Injector;
use ferrule_di::resolver::ServicePtr;
use ferrule_di::{capability, provides, Injectable, Service};

// this is a capability we would like to use in our consumer
#[capability]
trait TestTrait {
    fn foo(&self);
}

// this is a service which implements the above trait
#[derive(Service)]
struct TestDependency;

// we're telling the container to provide TestDependency when asked for dyn TestTrait
#[provides]
impl TestTrait for TestDependency {
    fn foo(&self) {
        println!("Hello world!");
    }
}

// this is a consumer with a dependency; it doesn't need to be registered itself
#[derive(Injectable, Default)]
struct TestConsumer {
    // the container will look for a service providing dyn TestTrait
    #[inject]
    dependency: Option<ServicePtr<dyn TestTrait + Send + Sync>>,
    // alternatively, you can inject the concrete type
    // dependency: Option<ServicePtr<TestDependency>>,
}

impl TestConsumer {
    fn call_foo(&self) {
        if let Some(dependency) = &self.dependency {
            dependency.foo();
        }
    }
}

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // services live in an Injector
    let injector = Injector::new();
    injector
        .provide(TestDependency)
        .expect("error registering TestDependency");

    let mut consumer = TestConsumer::default();
    injector
        .prepare(&mut consumer)
        .expect("error preparing TestConsumer");

    // prints "Hello world!"
    consumer.call_foo();
}
