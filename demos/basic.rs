//! 基本使用示例
//!
//! 展示如何用 qiniulog-parser 解析一批七牛风格日志。
//! 设置 `RUST_LOG=qiniulog_parser=trace` 可以看到每一条无法解析的行。

use qiniulog_parser::{ParserConfig, QiniulogParser, Schema, parse_batches};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qiniulog_parser=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let lines = [
        "2017/03/28 15:41:06 [Wm0AAPg-IUMW-68U][INFO] bdc.go:573: deleted: 67608",
        "2016/10/20 17:30:21.433423 [GE2owHck-Y4IWJHS][WARN] github.com/qiniu/http/rpcutil.v1/rpc_util.go:203:  ==> qiniu.com/streaming.v2/apiserver.go:1367: E18102: The specified repo does not exist",
        "\t\t[GE2owHck-Y4IWJHS]{\"error\":\"No such entry\",\"code\":612}",
        "",
        "2016/10/20 18:20:30.642666 [ERROR] github.com/qiniu/logkit/queue/disk.go:241: DISKQUEUE(stream_local_save): readOne() error",
    ];

    // 方法 1: 默认字段顺序，保留降级记录
    println!("=== 方法 1: 默认字段顺序 ===");
    let parser = match QiniulogParser::new(ParserConfig::default()) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("配置错误: {}", e);
            return;
        }
    };
    println!("行首正则: {}", parser.pattern());

    let output = parser.parse(&lines);
    for (i, record) in output.records.iter().enumerate() {
        println!("\n记录 {}:", i + 1);
        for (name, value) in record.fields() {
            println!("  {}: {}", name, value);
        }
    }
    if let Some(failure) = &output.failure {
        println!("\n部分失败: {}", failure);
    }

    // 方法 2: level 在前、带前缀的布局，多批次并行解析
    println!("\n=== 方法 2: 自定义布局 + 并行批次 ===");
    let headers = match Schema::parse_headers("prefix,date,time,level,reqid,file") {
        Ok(headers) => headers,
        Err(e) => {
            eprintln!("配置错误: {}", e);
            return;
        }
    };
    let config = ParserConfig::default()
        .with_headers(headers)
        .with_prefix("QINIU")
        .with_disable_record_errdata(true);
    let parser = match QiniulogParser::new(config) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("配置错误: {}", e);
            return;
        }
    };

    let batches = vec![
        vec![
            "QINIU 2017/01/22 11:16:08.885550 [INFO][2pyKMgVp5EKg-ZsU][\"github.com/teapots/request-logger/logger.go:75\"] [REQ_END] 200 0.010k 3.792ms",
        ],
        vec![
            "stray line without head",
            "QINIU 2017/01/22 11:16:08.883870 [ERROR][\"qiniu.io/gaea/app/providers/admin_login/admin_login.go:29\"] current uid: 74121669",
        ],
    ];
    for (i, output) in parse_batches(&parser, &batches).iter().enumerate() {
        println!(
            "批次 {}: {} 条记录，{} 行失败",
            i + 1,
            output.records.len(),
            output.error_count()
        );
        for record in &output.records {
            println!("  {} [{}] {} {}", record.time, record.level, record.file, record.log);
        }
    }
}
