// Kube-rs based Kubernetes client
pub mod crds;
pub mod kube_client;
pub mod kube_resources;
pub mod watchers;
