fn main() {
    use cfg_aliases::cfg_aliases;

    cfg_aliases! {
        android: { target_os = "android" },
        linux: { target_os = "linux" },
        linux_android: { any(android, linux) },
        apple_targets: { any(target_os = "macos", target_os = "ios", target_os = "tvos",
                             target_os = "watchos", target_os = "visionos") },
        freebsdlike: { any(target_os = "freebsd", target_os = "dragonfly") },
        netbsdlike: { any(target_os = "netbsd", target_os = "openbsd") },
        bsd: { any(apple_targets, freebsdlike, netbsdlike) },
        solarish: { any(target_os = "illumos", target_os = "solaris") },
    }
}
