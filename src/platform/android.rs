//! Android adapter backed by JNI calls into the framework services.
//!
//! The embedding activity hands over its `JavaVM` and a global reference to
//! its `Context`; every call attaches the current thread for its duration.

use super::{
    release_fault, settings_action_for, CallerIdentity, ExceptionState, InstallCheck, OpMode,
    PermissionCheck, SettingsNavigator, UsageDataSource,
};
use crate::error::UsageError;
use crate::models::{Granularity, UsageRecord, UsageWindow};
use jni::errors::Error as JniError;
use jni::objects::{GlobalRef, JList, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

const APP_OPS_SERVICE: &str = "appops";
const USAGE_STATS_SERVICE: &str = "usagestats";
const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;
const NAME_NOT_FOUND: &str = "android/content/pm/PackageManager$NameNotFoundException";

impl ExceptionState for JNIEnv<'_> {
    fn exception_pending(&self) -> bool {
        self.exception_check().unwrap_or(false)
    }

    fn discard_exception(&self) {
        if let Err(e) = self.exception_describe().and_then(|()| self.exception_clear()) {
            log::error!("Failed to clear Java exception: {e}");
        }
    }
}

pub struct AndroidPlatform {
    vm: JavaVM,
    context: GlobalRef,
}

impl AndroidPlatform {
    pub fn new(vm: JavaVM, context: GlobalRef) -> Self {
        Self { vm, context }
    }

    /// Attach the current thread and run `f`. Any exception `f` leaves
    /// pending is cleared before the fault is returned.
    fn with_env<T, F>(&self, capability: &'static str, f: F) -> Result<T, UsageError>
    where
        F: FnOnce(&mut JNIEnv) -> jni::errors::Result<T>,
    {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| UsageError::unavailable(capability, e.to_string()))?;

        f(&mut *env).map_err(|e| release_fault(&*env, capability, e.to_string()))
    }

    /// Uid and package name of the running app.
    pub fn caller_identity(&self) -> Result<CallerIdentity, UsageError> {
        self.with_env("process identity", |env| {
            let uid = env
                .call_static_method("android/os/Process", "myUid", "()I", &[])?
                .i()?;
            let package = self.package_name(env)?;

            Ok(CallerIdentity {
                uid: u32::try_from(uid).unwrap_or_default(),
                package,
            })
        })
    }

    fn package_name(&self, env: &mut JNIEnv) -> jni::errors::Result<String> {
        let name = env
            .call_method(self.context.as_obj(), "getPackageName", "()Ljava/lang/String;", &[])?
            .l()?;
        let name = JString::from(name);
        let value: String = env.get_string(&name)?.into();
        Ok(value)
    }

    fn system_service<'local>(
        &self,
        env: &mut JNIEnv<'local>,
        name: &str,
    ) -> jni::errors::Result<JObject<'local>> {
        let name = env.new_string(name)?;
        env.call_method(
            self.context.as_obj(),
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[(&name).into()],
        )?
        .l()
    }

    fn check_op_mode(
        &self,
        env: &mut JNIEnv,
        op: &str,
        caller: &CallerIdentity,
    ) -> jni::errors::Result<i32> {
        let app_ops = self.system_service(env, APP_OPS_SERVICE)?;
        let op = env.new_string(op)?;
        let package = env.new_string(&caller.package)?;
        let uid = i32::try_from(caller.uid).unwrap_or(-1);

        env.call_method(
            &app_ops,
            "checkOpNoThrow",
            "(Ljava/lang/String;ILjava/lang/String;)I",
            &[(&op).into(), JValue::Int(uid), (&package).into()],
        )?
        .i()
    }

    fn read_usage_stats(
        &self,
        env: &mut JNIEnv,
        window: &UsageWindow,
        granularity: Granularity,
    ) -> jni::errors::Result<Vec<UsageRecord>> {
        let manager = self.system_service(env, USAGE_STATS_SERVICE)?;

        let stats = env
            .call_method(
                &manager,
                "queryUsageStats",
                "(IJJ)Ljava/util/List;",
                &[
                    JValue::Int(granularity.interval_code()),
                    JValue::Long(window.start_ms),
                    JValue::Long(window.end_ms),
                ],
            )?
            .l()?;

        if stats.is_null() {
            return Ok(Vec::new());
        }

        let list = JList::from_env(env, &stats)?;
        let mut records = Vec::new();
        let mut iter = list.iter(env)?;
        while let Some(entry) = iter.next(env)? {
            let package = env
                .call_method(&entry, "getPackageName", "()Ljava/lang/String;", &[])?
                .l()?;
            let package = JString::from(package);
            let identifier: String = env.get_string(&package)?.into();
            let foreground = env
                .call_method(&entry, "getTotalTimeInForeground", "()J", &[])?
                .j()?;

            records.push(UsageRecord {
                identifier,
                foreground_ms: u64::try_from(foreground).unwrap_or(0),
            });

            env.delete_local_ref(package)?;
            env.delete_local_ref(entry)?;
        }

        Ok(records)
    }

    fn start_settings(&self, env: &mut JNIEnv, action: &str) -> jni::errors::Result<()> {
        let action = env.new_string(action)?;
        let intent = env.new_object(
            "android/content/Intent",
            "(Ljava/lang/String;)V",
            &[(&action).into()],
        )?;
        // Context may not be an activity
        env.call_method(
            &intent,
            "addFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(FLAG_ACTIVITY_NEW_TASK)],
        )?;
        env.call_method(
            self.context.as_obj(),
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[(&intent).into()],
        )?;
        Ok(())
    }

    fn lookup_package(&self, env: &mut JNIEnv, identifier: &str) -> jni::errors::Result<bool> {
        let manager = env
            .call_method(
                self.context.as_obj(),
                "getPackageManager",
                "()Landroid/content/pm/PackageManager;",
                &[],
            )?
            .l()?;
        let package = env.new_string(identifier)?;

        let lookup = env.call_method(
            &manager,
            "getPackageInfo",
            "(Ljava/lang/String;I)Landroid/content/pm/PackageInfo;",
            &[(&package).into(), JValue::Int(0)],
        );

        match lookup {
            Ok(_) => Ok(true),
            Err(JniError::JavaException) => {
                // Only the not-found exception means "absent"; anything else
                // is rethrown and cleared as a fault.
                let throwable = env.exception_occurred()?;
                env.exception_clear()?;
                if env.is_instance_of(&throwable, NAME_NOT_FOUND)? {
                    Ok(false)
                } else {
                    env.throw(throwable)?;
                    Err(JniError::JavaException)
                }
            }
            Err(e) => Err(e),
        }
    }
}

impl PermissionCheck for AndroidPlatform {
    fn check_op(&self, op: &str, caller: &CallerIdentity) -> OpMode {
        match self.with_env("app ops", |env| self.check_op_mode(env, op, caller)) {
            Ok(code) => OpMode::from_code(code),
            Err(e) => {
                log::warn!("App-ops check for {op} failed: {e}");
                OpMode::Errored
            }
        }
    }
}

impl SettingsNavigator for AndroidPlatform {
    fn open_settings_for(&self, op: &str) -> Result<(), UsageError> {
        let action = settings_action_for(op).ok_or_else(|| {
            UsageError::unavailable("settings navigation", format!("no settings screen for {op}"))
        })?;
        self.with_env("settings navigation", |env| self.start_settings(env, action))
    }
}

impl UsageDataSource for AndroidPlatform {
    fn query(
        &self,
        window: &UsageWindow,
        granularity: Granularity,
    ) -> Result<Vec<UsageRecord>, UsageError> {
        self.with_env("usage stats service", |env| {
            self.read_usage_stats(env, window, granularity)
        })
    }
}

impl InstallCheck for AndroidPlatform {
    fn is_installed(&self, identifier: &str) -> Result<bool, UsageError> {
        self.with_env("package manager", |env| self.lookup_package(env, identifier))
    }
}
