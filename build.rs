// Generates the AccessLogService server trait and client for the hand-declared
// prost messages in `src/proto`, so the build does not need `protoc`.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let access_log_service = tonic_build::manual::Service::builder()
        .name("AccessLogService")
        .package("envoy.service.accesslog.v3")
        .method(
            tonic_build::manual::Method::builder()
                .name("stream_access_logs")
                .route_name("StreamAccessLogs")
                .input_type("crate::proto::StreamAccessLogsMessage")
                .output_type("crate::proto::StreamAccessLogsResponse")
                .codec_path("tonic_prost::ProstCodec")
                .client_streaming()
                .build(),
        )
        .build();

    tonic_build::manual::Builder::new().compile(&[access_log_service]);
}
