// @generated
/// Generated client implementations.
pub mod routing_service_client {
    #![allow(
        unused_variables,
        dead_code,
        missing_docs,
        clippy::wildcard_imports,
        clippy::let_unit_value,
    )]
    use tonic::codegen::*;
    use tonic::codegen::http::Uri;
    /** RoutingService demonstrates the four gRPC interaction patterns on top of
 a metric sample fan-out hub.
*/
    #[derive(Debug, Clone)]
    pub struct RoutingServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl RoutingServiceClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> RoutingServiceClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::Body>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_origin(inner: T, origin: Uri) -> Self {
            let inner = tonic::client::Grpc::with_origin(inner, origin);
            Self { inner }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> RoutingServiceClient<InterceptedService<T, F>>
        where
            F: tonic::service::Interceptor,
            T::ResponseBody: Default,
            T: tonic::codegen::Service<
                http::Request<tonic::body::Body>,
                Response = http::Response<
                    <T as tonic::client::GrpcService<tonic::body::Body>>::ResponseBody,
                >,
            >,
            <T as tonic::codegen::Service<
                http::Request<tonic::body::Body>,
            >>::Error: Into<StdError> + std::marker::Send + std::marker::Sync,
        {
            RoutingServiceClient::new(InterceptedService::new(inner, interceptor))
        }
        /// Compress requests with the given encoding.
        ///
        /// This requires the server to support it otherwise it might respond with an
        /// error.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.send_compressed(encoding);
            self
        }
        /// Enable decompressing responses.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.accept_compressed(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        ///
        /// Default: `4MB`
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_decoding_message_size(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        ///
        /// Default: `usize::MAX`
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_encoding_message_size(limit);
            self
        }
        /** Single request, single response.
*/
        pub async fn exec_unary(
            &mut self,
            request: impl tonic::IntoRequest<super::UnaryRequest>,
        ) -> std::result::Result<tonic::Response<super::UnaryResponse>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic_prost::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/routing.v1.RoutingService/ExecUnary",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("routing.v1.RoutingService", "ExecUnary"));
            self.inner.unary(req, path, codec).await
        }
        /** Client streams sources, server answers once after the client half-closes.
*/
        pub async fn exec_client_streaming(
            &mut self,
            request: impl tonic::IntoStreamingRequest<
                Message = super::ClientStreamingRequest,
            >,
        ) -> std::result::Result<
            tonic::Response<super::ClientStreamingResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic_prost::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/routing.v1.RoutingService/ExecClientStreaming",
            );
            let mut req = request.into_streaming_request();
            req.extensions_mut()
                .insert(
                    GrpcMethod::new("routing.v1.RoutingService", "ExecClientStreaming"),
                );
            self.inner.client_streaming(req, path, codec).await
        }
        /** Server streams metric samples to the subscribing client until it disconnects.
*/
        pub async fn exec_server_streaming(
            &mut self,
            request: impl tonic::IntoRequest<super::ServerStreamingRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::ServerStreamingResponse>>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic_prost::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/routing.v1.RoutingService/ExecServerStreaming",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(
                    GrpcMethod::new("routing.v1.RoutingService", "ExecServerStreaming"),
                );
            self.inner.server_streaming(req, path, codec).await
        }
        /** Both sides stream independently.
*/
        pub async fn exec_bi_di_streaming(
            &mut self,
            request: impl tonic::IntoStreamingRequest<
                Message = super::BiDiStreamingRequest,
            >,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::BiDiStreamingResponse>>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic_prost::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/routing.v1.RoutingService/ExecBiDiStreaming",
            );
            let mut req = request.into_streaming_request();
            req.extensions_mut()
                .insert(
                    GrpcMethod::new("routing.v1.RoutingService", "ExecBiDiStreaming"),
                );
            self.inner.streaming(req, path, codec).await
        }
    }
}
/// Generated server implementations.
pub mod routing_service_server {
    #![allow(
        unused_variables,
        dead_code,
        missing_docs,
        clippy::wildcard_imports,
        clippy::let_unit_value,
    )]
    use tonic::codegen::*;
    /// Generated trait containing gRPC methods that should be implemented for use with RoutingServiceServer.
    #[async_trait]
    pub trait RoutingService: std::marker::Send + std::marker::Sync + 'static {
        /** Single request, single response.
*/
        async fn exec_unary(
            &self,
            request: tonic::Request<super::UnaryRequest>,
        ) -> std::result::Result<tonic::Response<super::UnaryResponse>, tonic::Status>;
        /** Client streams sources, server answers once after the client half-closes.
*/
        async fn exec_client_streaming(
            &self,
            request: tonic::Request<tonic::Streaming<super::ClientStreamingRequest>>,
        ) -> std::result::Result<
            tonic::Response<super::ClientStreamingResponse>,
            tonic::Status,
        >;
        /// Server streaming response type for the ExecServerStreaming method.
        type ExecServerStreamingStream: tonic::codegen::tokio_stream::Stream<
                Item = std::result::Result<
                    super::ServerStreamingResponse,
                    tonic::Status,
                >,
            >
            + std::marker::Send
            + 'static;
        /** Server streams metric samples to the subscribing client until it disconnects.
*/
        async fn exec_server_streaming(
            &self,
            request: tonic::Request<super::ServerStreamingRequest>,
        ) -> std::result::Result<
            tonic::Response<Self::ExecServerStreamingStream>,
            tonic::Status,
        >;
        /// Server streaming response type for the ExecBiDiStreaming method.
        type ExecBiDiStreamingStream: tonic::codegen::tokio_stream::Stream<
                Item = std::result::Result<super::BiDiStreamingResponse, tonic::Status>,
            >
            + std::marker::Send
            + 'static;
        /** Both sides stream independently.
*/
        async fn exec_bi_di_streaming(
            &self,
            request: tonic::Request<tonic::Streaming<super::BiDiStreamingRequest>>,
        ) -> std::result::Result<
            tonic::Response<Self::ExecBiDiStreamingStream>,
            tonic::Status,
        >;
    }
    /** RoutingService demonstrates the four gRPC interaction patterns on top of
 a metric sample fan-out hub.
*/
    #[derive(Debug)]
    pub struct RoutingServiceServer<T> {
        inner: Arc<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
        max_decoding_message_size: Option<usize>,
        max_encoding_message_size: Option<usize>,
    }
    impl<T> RoutingServiceServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }
        pub fn from_arc(inner: Arc<T>) -> Self {
            Self {
                inner,
                accept_compression_encodings: Default::default(),
                send_compression_encodings: Default::default(),
                max_decoding_message_size: None,
                max_encoding_message_size: None,
            }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> InterceptedService<Self, F>
        where
            F: tonic::service::Interceptor,
        {
            InterceptedService::new(Self::new(inner), interceptor)
        }
        /// Enable decompressing requests with the given encoding.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.accept_compression_encodings.enable(encoding);
            self
        }
        /// Compress responses with the given encoding, if the client supports it.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.send_compression_encodings.enable(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        ///
        /// Default: `4MB`
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.max_decoding_message_size = Some(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        ///
        /// Default: `usize::MAX`
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.max_encoding_message_size = Some(limit);
            self
        }
    }
    impl<T, B> tonic::codegen::Service<http::Request<B>> for RoutingServiceServer<T>
    where
        T: RoutingService,
        B: Body + std::marker::Send + 'static,
        B::Error: Into<StdError> + std::marker::Send + 'static,
    {
        type Response = http::Response<tonic::body::Body>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<std::result::Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            match req.uri().path() {
                "/routing.v1.RoutingService/ExecUnary" => {
                    #[allow(non_camel_case_types)]
                    struct ExecUnarySvc<T: RoutingService>(pub Arc<T>);
                    impl<
                        T: RoutingService,
                    > tonic::server::UnaryService<super::UnaryRequest>
                    for ExecUnarySvc<T> {
                        type Response = super::UnaryResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::UnaryRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as RoutingService>::exec_unary(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = ExecUnarySvc(inner);
                        let codec = tonic_prost::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/routing.v1.RoutingService/ExecClientStreaming" => {
                    #[allow(non_camel_case_types)]
                    struct ExecClientStreamingSvc<T: RoutingService>(pub Arc<T>);
                    impl<
                        T: RoutingService,
                    > tonic::server::ClientStreamingService<
                        super::ClientStreamingRequest,
                    > for ExecClientStreamingSvc<T> {
                        type Response = super::ClientStreamingResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                tonic::Streaming<super::ClientStreamingRequest>,
                            >,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as RoutingService>::exec_client_streaming(
                                        &inner,
                                        request,
                                    )
                                    .await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = ExecClientStreamingSvc(inner);
                        let codec = tonic_prost::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.client_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/routing.v1.RoutingService/ExecServerStreaming" => {
                    #[allow(non_camel_case_types)]
                    struct ExecServerStreamingSvc<T: RoutingService>(pub Arc<T>);
                    impl<
                        T: RoutingService,
                    > tonic::server::ServerStreamingService<
                        super::ServerStreamingRequest,
                    > for ExecServerStreamingSvc<T> {
                        type Response = super::ServerStreamingResponse;
                        type ResponseStream = T::ExecServerStreamingStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ServerStreamingRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as RoutingService>::exec_server_streaming(
                                        &inner,
                                        request,
                                    )
                                    .await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = ExecServerStreamingSvc(inner);
                        let codec = tonic_prost::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.server_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/routing.v1.RoutingService/ExecBiDiStreaming" => {
                    #[allow(non_camel_case_types)]
                    struct ExecBiDiStreamingSvc<T: RoutingService>(pub Arc<T>);
                    impl<
                        T: RoutingService,
                    > tonic::server::StreamingService<super::BiDiStreamingRequest>
                    for ExecBiDiStreamingSvc<T> {
                        type Response = super::BiDiStreamingResponse;
                        type ResponseStream = T::ExecBiDiStreamingStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                tonic::Streaming<super::BiDiStreamingRequest>,
                            >,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as RoutingService>::exec_bi_di_streaming(
                                        &inner,
                                        request,
                                    )
                                    .await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = ExecBiDiStreamingSvc(inner);
                        let codec = tonic_prost::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => {
                    Box::pin(async move {
                        let mut response = http::Response::new(
                            tonic::body::Body::default(),
                        );
                        let headers = response.headers_mut();
                        headers
                            .insert(
                                tonic::Status::GRPC_STATUS,
                                (tonic::Code::Unimplemented as i32).into(),
                            );
                        headers
                            .insert(
                                http::header::CONTENT_TYPE,
                                tonic::metadata::GRPC_CONTENT_TYPE,
                            );
                        Ok(response)
                    })
                }
            }
        }
    }
    impl<T> Clone for RoutingServiceServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
                max_decoding_message_size: self.max_decoding_message_size,
                max_encoding_message_size: self.max_encoding_message_size,
            }
        }
    }
    /// Generated gRPC service name
    pub const SERVICE_NAME: &str = "routing.v1.RoutingService";
    impl<T> tonic::server::NamedService for RoutingServiceServer<T> {
        const NAME: &'static str = SERVICE_NAME;
    }
}
