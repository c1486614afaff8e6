// note: this example assumes you've analyzed the previous one

use ferrule_di::injector::Injector;
use ferrule_di::resolver::{ServicePtr, TypedServiceResolver};
use ferrule_di::{capability, provides, provisions, Injectable, Service};

#[capability]
trait TestTrait {
    fn foo(&self);
}

#[derive(Service)]
struct TestDependency1;

#[provides]
impl TestTrait for TestDependency1 {
    fn foo(&self) {
        println!("Hello world from 1!");
    }
}

#[derive(Service)]
struct TestDependency2;

#[provides]
impl TestTrait for TestDependency2 {
    fn foo(&self) {
        println!("Hello world from 2!");
    }
}

#[derive(Injectable, Default)]
struct TestConsumer {
    // with several candidates for dyn TestTrait, the most recently registered one is injected
    #[inject]
    dependency_1: Option<ServicePtr<dyn TestTrait + Send + Sync>>,
    // it's possible to select a service by the end of its type name
    #[inject(name = "TestDependency1")]
    dependency_2: Option<ServicePtr<dyn TestTrait + Send + Sync>>,
    // optional dependencies are left empty when nothing can be injected
    #[inject(optional)]
    dependency_3: Option<ServicePtr<TestConsumerHelper>>,
}

#[derive(Service)]
struct TestConsumerHelper;

fn main() {
    let injector = Injector::new();
    injector
        .provide_all(provisions![TestDependency1, TestDependency2])
        .expect("error registering services");

    let mut consumer = TestConsumer::default();
    injector.must_prepare(&mut consumer);

    // prints "Hello world from 2!" and "Hello world from 1!"
    for dependency in [&consumer.dependency_1, &consumer.dependency_2]
        .into_iter()
        .flatten()
    {
        dependency.foo();
    }

    assert!(consumer.dependency_3.is_none());

    // all services providing a capability can be requested at once
    let all = injector
        .get_all::<dyn TestTrait + Send + Sync>()
        .expect("error resolving all services");
    println!("Found {} services.", all.len());
}
