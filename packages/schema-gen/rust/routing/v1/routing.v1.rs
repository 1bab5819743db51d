// @generated
// This file is @generated by prost-build.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct UnaryRequest {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct UnaryResponse {
    #[prost(string, tag = "1")]
    pub status: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ClientStreamingRequest {
    #[prost(string, tag = "1")]
    pub src: ::prost::alloc::string::String,
}
/// Summary of a completed client stream.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ClientStreamingResponse {
    #[prost(uint32, tag = "1")]
    pub received: u32,
    #[prost(string, repeated, tag = "2")]
    pub sources: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ServerStreamingRequest {
    #[prost(string, tag = "1")]
    pub client_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerStreamingResponse {
    #[prost(string, tag = "1")]
    pub src: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub dst: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub metric1: i32,
    #[prost(int32, tag = "4")]
    pub metric2: i32,
    #[prost(int32, tag = "5")]
    pub metric3: i32,
    #[prost(message, optional, tag = "6")]
    pub observed_at: ::core::option::Option<::prost_types::Timestamp>,
}
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct BiDiStreamingRequest {}
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct BiDiStreamingResponse {
    #[prost(uint32, tag = "1")]
    pub sequence: u32,
}
include!("routing.v1.tonic.rs");
// @@protoc_insertion_point(module)
